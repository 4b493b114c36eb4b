//! End-to-end mapper binding scenarios against an in-memory session.

use std::ops::ControlFlow;
use std::sync::Arc;

use sqlbind::{
    Arg, BatchResult, CommandKind, Configuration, Error, KeyedRows, MappedStatement, MapperEngine,
    MapperSpec, MethodDescriptor, Output, PageBounds, ParamSpec, ParamValue, RowCallback,
    RowCursor, Session, TypeRef, Value, VecCursor,
};

const USER_MAPPER: &str = "app.UserMapper";

fn user(id: &str, name: &str) -> Value {
    Value::object([("id", Value::from(id)), ("name", Value::from(name))])
}

/// A session over one in-memory user table, dispatching on statement id.
struct MemSession {
    config: Arc<Configuration>,
    users: Vec<Value>,
    pending: Vec<BatchResult>,
}

impl MemSession {
    fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            users: vec![user("u1", "Alice"), user("u2", "Bob"), user("u3", "Cara")],
            pending: Vec::new(),
        }
    }

    fn position_of(&self, id: &Value) -> Option<usize> {
        self.users.iter().position(|row| row.field("id") == Some(id))
    }
}

impl Session for MemSession {
    fn insert(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        match statement {
            "app.UserMapper.add" => {
                let row = param
                    .as_single()
                    .cloned()
                    .ok_or_else(|| sqlbind_core_err("add expects a row"))?;
                self.users.push(row);
                Ok(1)
            }
            other => Err(sqlbind_core_err(&format!("unknown statement: {other}"))),
        }
    }

    fn update(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        match statement {
            "app.UserMapper.update_name" => {
                let params = param
                    .as_named()
                    .ok_or_else(|| sqlbind_core_err("update_name expects named params"))?;
                let id = params.get("id")?.clone();
                let name = params.get("name")?.clone();
                match self.position_of(&id) {
                    Some(index) => {
                        self.users[index] = Value::object([
                            ("id", id),
                            ("name", name),
                        ]);
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
            other => Err(sqlbind_core_err(&format!("unknown statement: {other}"))),
        }
    }

    fn delete(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        match statement {
            "app.UserMapper.delete_missing" => {
                let id = param
                    .as_single()
                    .cloned()
                    .ok_or_else(|| sqlbind_core_err("delete expects an id"))?;
                match self.position_of(&id) {
                    Some(index) => {
                        self.users.remove(index);
                        Ok(1)
                    }
                    None => Ok(0),
                }
            }
            other => Err(sqlbind_core_err(&format!("unknown statement: {other}"))),
        }
    }

    fn select_one(
        &mut self,
        statement: &str,
        param: ParamValue,
    ) -> sqlbind_core::Result<Option<Value>> {
        match statement {
            "app.UserMapper.find" => {
                let id = param
                    .as_single()
                    .cloned()
                    .ok_or_else(|| sqlbind_core_err("find expects an id"))?;
                Ok(self.position_of(&id).map(|i| self.users[i].clone()))
            }
            other => Err(sqlbind_core_err(&format!("unknown statement: {other}"))),
        }
    }

    fn select_list(
        &mut self,
        _statement: &str,
        _param: ParamValue,
        page: PageBounds,
    ) -> sqlbind_core::Result<Vec<Value>> {
        Ok(page.apply(self.users.clone()))
    }

    fn select_map(
        &mut self,
        _statement: &str,
        _param: ParamValue,
        map_key: &str,
        page: PageBounds,
    ) -> sqlbind_core::Result<KeyedRows> {
        let handlers = self.config.type_handlers();
        let mut keyed = KeyedRows::new();
        for row in page.apply(self.users.clone()) {
            let key_value = row.field(map_key).cloned().unwrap_or(Value::Null);
            keyed.insert(handlers.text_for("String", &key_value), row);
        }
        Ok(keyed)
    }

    fn select_cursor(
        &mut self,
        _statement: &str,
        _param: ParamValue,
        page: PageBounds,
    ) -> sqlbind_core::Result<Box<dyn RowCursor>> {
        Ok(Box::new(VecCursor::new(page.apply(self.users.clone()))))
    }

    fn select_each(
        &mut self,
        _statement: &str,
        _param: ParamValue,
        page: PageBounds,
        callback: &mut dyn RowCallback,
    ) -> sqlbind_core::Result<()> {
        for row in page.apply(self.users.clone()) {
            if callback.handle(row) == ControlFlow::Break(()) {
                break;
            }
        }
        Ok(())
    }

    fn flush_statements(&mut self) -> sqlbind_core::Result<Vec<BatchResult>> {
        Ok(std::mem::take(&mut self.pending))
    }
}

fn sqlbind_core_err(reason: &str) -> sqlbind_core::Error {
    sqlbind_core::Error::session(reason)
}

fn build_config() -> Configuration {
    let mut config = Configuration::new();
    config.add_mapper(
        MapperSpec::new(USER_MAPPER)
            .method(
                MethodDescriptor::new("find", TypeRef::named("User"))
                    .param(ParamSpec::value("id")),
            )
            .method(MethodDescriptor::new("list_all", TypeRef::list_of("User")))
            .method(
                MethodDescriptor::new("update_name", TypeRef::Int)
                    .param(ParamSpec::named("id", "id"))
                    .param(ParamSpec::named("name", "name")),
            )
            .method(
                MethodDescriptor::new("delete_missing", TypeRef::Bool)
                    .param(ParamSpec::value("id")),
            )
            .method(
                MethodDescriptor::new(
                    "by_id",
                    TypeRef::Map {
                        value: Box::new(TypeRef::named("User")),
                    },
                )
                .map_key("id"),
            )
            .method(MethodDescriptor::new(
                "scan",
                TypeRef::Cursor(Box::new(TypeRef::named("User"))),
            ))
            .method(
                MethodDescriptor::new("add", TypeRef::Int).param(ParamSpec::value("user")),
            )
            .method(MethodDescriptor::new("ghost", TypeRef::named("User"))),
    );
    for (statement, kind) in [
        ("app.UserMapper.add", CommandKind::Insert),
        ("app.UserMapper.find", CommandKind::Select),
        ("app.UserMapper.list_all", CommandKind::Select),
        ("app.UserMapper.update_name", CommandKind::Update),
        ("app.UserMapper.delete_missing", CommandKind::Delete),
        ("app.UserMapper.by_id", CommandKind::Select),
        ("app.UserMapper.scan", CommandKind::Select),
    ] {
        config.add_statement(MappedStatement::new(statement, kind));
    }
    config
}

fn setup() -> (MapperEngine, MemSession) {
    let config = Arc::new(build_config());
    let engine = MapperEngine::new(config.clone());
    let session = MemSession::new(config);
    (engine, session)
}

// =============================================================================
// A hand-written typed wrapper, the way callers are expected to bind
// =============================================================================

struct UserMapper<'e> {
    engine: &'e MapperEngine,
}

impl UserMapper<'_> {
    fn find(&self, session: &mut dyn Session, id: &str) -> Result<Option<Value>, Error> {
        match self.engine.execute(
            session,
            USER_MAPPER,
            "find",
            vec![Arg::Value(Value::from(id))],
        )? {
            Output::Row(row) => Ok(row),
            other => panic!("find produced {}", other.variant_name()),
        }
    }

    fn list_all(&self, session: &mut dyn Session) -> Result<Vec<Value>, Error> {
        match self.engine.execute(session, USER_MAPPER, "list_all", vec![])? {
            Output::Rows(rows) => Ok(rows),
            other => panic!("list_all produced {}", other.variant_name()),
        }
    }

    fn update_name(&self, session: &mut dyn Session, id: &str, name: &str) -> Result<i32, Error> {
        match self.engine.execute(
            session,
            USER_MAPPER,
            "update_name",
            vec![Arg::Value(Value::from(id)), Arg::Value(Value::from(name))],
        )? {
            Output::Int(count) => Ok(count),
            other => panic!("update_name produced {}", other.variant_name()),
        }
    }

    fn delete_missing(&self, session: &mut dyn Session, id: &str) -> Result<bool, Error> {
        match self.engine.execute(
            session,
            USER_MAPPER,
            "delete_missing",
            vec![Arg::Value(Value::from(id))],
        )? {
            Output::Bool(hit) => Ok(hit),
            other => panic!("delete_missing produced {}", other.variant_name()),
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn find_returns_the_matching_row_unmodified() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    let found = mapper.find(&mut session, "u1").unwrap();
    assert_eq!(found, Some(user("u1", "Alice")));
}

#[test]
fn find_with_no_match_returns_none_never_throws() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    assert_eq!(mapper.find(&mut session, "zzz").unwrap(), None);
}

#[test]
fn list_all_returns_rows_in_original_order() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    let rows = mapper.list_all(&mut session).unwrap();
    assert_eq!(
        rows,
        vec![user("u1", "Alice"), user("u2", "Bob"), user("u3", "Cara")]
    );
}

#[test]
fn update_name_reports_one_affected_row() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    assert_eq!(mapper.update_name(&mut session, "u1", "X").unwrap(), 1);
    assert_eq!(mapper.find(&mut session, "u1").unwrap(), Some(user("u1", "X")));
}

#[test]
fn delete_missing_reports_false_on_zero_rows() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    assert!(!mapper.delete_missing(&mut session, "zzz").unwrap());
    assert!(mapper.delete_missing(&mut session, "u2").unwrap());
    assert_eq!(mapper.list_all(&mut session).unwrap().len(), 2);
}

#[test]
fn insert_binds_the_single_row_argument_directly() {
    let (engine, mut session) = setup();
    let out = engine
        .execute(
            &mut session,
            USER_MAPPER,
            "add",
            vec![Arg::Value(user("u4", "Dana"))],
        )
        .unwrap();
    assert!(matches!(out, Output::Int(1)));
    let mapper = UserMapper { engine: &engine };
    assert_eq!(mapper.find(&mut session, "u4").unwrap(), Some(user("u4", "Dana")));
}

#[test]
fn ghost_method_fails_naming_the_statement() {
    let (engine, mut session) = setup();
    let err = engine
        .execute(&mut session, USER_MAPPER, "ghost", vec![])
        .unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedStatement {
            statement: "app.UserMapper.ghost".to_string()
        }
    );
}

#[test]
fn repeated_execution_reuses_cached_metadata() {
    let (engine, mut session) = setup();
    let mapper = UserMapper { engine: &engine };
    let first = mapper.find(&mut session, "u2").unwrap();
    let second = mapper.find(&mut session, "u2").unwrap();
    assert_eq!(first, second);
}

#[test]
fn keyed_select_uses_the_declared_map_key() {
    let (engine, mut session) = setup();
    let out = engine
        .execute(&mut session, USER_MAPPER, "by_id", vec![])
        .unwrap();
    match out {
        Output::RowMap(keyed) => {
            assert_eq!(keyed.len(), 3);
            assert_eq!(keyed.get("u2"), Some(&user("u2", "Bob")));
        }
        other => panic!("by_id produced {}", other.variant_name()),
    }
}

#[test]
fn cursor_select_is_lazy_single_pass_and_closeable() {
    let (engine, mut session) = setup();
    let out = engine
        .execute(&mut session, USER_MAPPER, "scan", vec![])
        .unwrap();
    let mut cursor = match out {
        Output::Cursor(cursor) => cursor,
        other => panic!("scan produced {}", other.variant_name()),
    };
    let mut seen = Vec::new();
    while let Some(row) = cursor.next_row().unwrap() {
        seen.push(row);
    }
    assert_eq!(seen.len(), 3);
    assert!(cursor.is_consumed());
    cursor.close().unwrap();
    assert!(cursor.next_row().is_err());
}
