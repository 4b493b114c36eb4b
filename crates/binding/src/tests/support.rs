//! Shared fixtures: a scripted session and a standard mapper universe.

use std::ops::ControlFlow;

use sqlbind_core::{
    BatchResult, KeyedRows, PageBounds, ParamValue, RowCallback, RowCursor, Session, Value,
    VecCursor,
};

use crate::{
    CommandKind, Configuration, MappedStatement, MapperSpec, MethodDescriptor, ParamSpec,
    ParentRef, TypeRef,
};

/// A session that replays scripted results and records what it was asked.
#[derive(Debug, Default)]
pub struct FakeSession {
    pub row: Option<Value>,
    pub rows: Vec<Value>,
    pub keyed: KeyedRows,
    pub affected: i32,
    pub batches: Vec<BatchResult>,
    /// `"{operation}:{statement}"` per call, in order.
    pub calls: Vec<String>,
    pub last_param: Option<ParamValue>,
    pub last_page: Option<PageBounds>,
    pub last_map_key: Option<String>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, operation: &str, statement: &str, param: ParamValue) {
        self.calls.push(format!("{operation}:{statement}"));
        self.last_param = Some(param);
    }
}

impl Session for FakeSession {
    fn insert(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        self.record("insert", statement, param);
        Ok(self.affected)
    }

    fn update(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        self.record("update", statement, param);
        Ok(self.affected)
    }

    fn delete(&mut self, statement: &str, param: ParamValue) -> sqlbind_core::Result<i32> {
        self.record("delete", statement, param);
        Ok(self.affected)
    }

    fn select_one(
        &mut self,
        statement: &str,
        param: ParamValue,
    ) -> sqlbind_core::Result<Option<Value>> {
        self.record("select_one", statement, param);
        Ok(self.row.clone())
    }

    fn select_list(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
    ) -> sqlbind_core::Result<Vec<Value>> {
        self.record("select_list", statement, param);
        self.last_page = Some(page);
        Ok(page.apply(self.rows.clone()))
    }

    fn select_map(
        &mut self,
        statement: &str,
        param: ParamValue,
        map_key: &str,
        page: PageBounds,
    ) -> sqlbind_core::Result<KeyedRows> {
        self.record("select_map", statement, param);
        self.last_page = Some(page);
        self.last_map_key = Some(map_key.to_string());
        Ok(self.keyed.clone())
    }

    fn select_cursor(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
    ) -> sqlbind_core::Result<Box<dyn RowCursor>> {
        self.record("select_cursor", statement, param);
        self.last_page = Some(page);
        Ok(Box::new(VecCursor::new(page.apply(self.rows.clone()))))
    }

    fn select_each(
        &mut self,
        statement: &str,
        param: ParamValue,
        page: PageBounds,
        callback: &mut dyn RowCallback,
    ) -> sqlbind_core::Result<()> {
        self.record("select_each", statement, param);
        self.last_page = Some(page);
        for row in page.apply(self.rows.clone()) {
            if callback.handle(row) == ControlFlow::Break(()) {
                break;
            }
        }
        Ok(())
    }

    fn flush_statements(&mut self) -> sqlbind_core::Result<Vec<BatchResult>> {
        self.calls.push("flush".to_string());
        Ok(self.batches.clone())
    }
}

pub const USER_MAPPER: &str = "app.UserMapper";
pub const BASE_MAPPER: &str = "app.BaseMapper";

/// Build a user row.
pub fn user(id: &str, name: &str) -> Value {
    Value::object([("id", Value::from(id)), ("name", Value::from(name))])
}

/// The standard test universe: a generic base mapper, a user mapper
/// extending it, and the statements the suites exercise.
pub fn user_config() -> Configuration {
    let mut config = Configuration::new();

    config.add_mapper(
        MapperSpec::new(BASE_MAPPER)
            .type_param("T")
            .method(
                MethodDescriptor::new("load", TypeRef::Param("T".to_string()))
                    .param(ParamSpec::value("id")),
            )
            .method(
                MethodDescriptor::new("load_all", TypeRef::List(Box::new(TypeRef::Param(
                    "T".to_string(),
                )))),
            ),
    );

    config.add_mapper(
        MapperSpec::new(USER_MAPPER)
            .extends(ParentRef::with_args(
                BASE_MAPPER,
                vec![TypeRef::named("User")],
            ))
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
            .method(MethodDescriptor::new("ghost", TypeRef::named("User")))
            .method(MethodDescriptor::new("flush_batch", TypeRef::Void).flush())
            .method(
                MethodDescriptor::new("flush_report", TypeRef::list_of("BatchResult")).flush(),
            )
            .method(
                MethodDescriptor::new("age_of", TypeRef::Int).param(ParamSpec::value("id")),
            )
            .method(
                MethodDescriptor::new("purge", TypeRef::Long).param(ParamSpec::value("id")),
            )
            .method(
                MethodDescriptor::new("rename_bad", TypeRef::named("User"))
                    .param(ParamSpec::value("id")),
            )
            .method(MethodDescriptor::new(
                "all_array",
                TypeRef::Array(Box::new(TypeRef::named("User"))),
            ))
            .method(MethodDescriptor::new(
                "recent",
                TypeRef::Collection {
                    name: "VecDeque".to_string(),
                    element: Box::new(TypeRef::named("User")),
                },
            ))
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
                MethodDescriptor::new("stream_all", TypeRef::Void)
                    .param(ParamSpec::page("page"))
                    .param(ParamSpec::callback("visitor")),
            )
            .method(
                MethodDescriptor::new("stream_bare", TypeRef::Void)
                    .param(ParamSpec::callback("visitor")),
            ),
    );

    for (statement, kind) in [
        ("app.UserMapper.find", CommandKind::Select),
        ("app.UserMapper.list_all", CommandKind::Select),
        ("app.UserMapper.update_name", CommandKind::Update),
        ("app.UserMapper.delete_missing", CommandKind::Delete),
        ("app.UserMapper.age_of", CommandKind::Select),
        ("app.UserMapper.purge", CommandKind::Delete),
        ("app.UserMapper.rename_bad", CommandKind::Update),
        ("app.UserMapper.all_array", CommandKind::Select),
        ("app.UserMapper.recent", CommandKind::Select),
        ("app.UserMapper.by_id", CommandKind::Select),
        ("app.UserMapper.scan", CommandKind::Select),
        ("app.UserMapper.stream_bare", CommandKind::Select),
        ("app.BaseMapper.load", CommandKind::Select),
        ("app.BaseMapper.load_all", CommandKind::Select),
    ] {
        config.add_statement(MappedStatement::new(statement, kind));
    }

    config.add_statement(
        MappedStatement::new("app.UserMapper.stream_all", CommandKind::Select)
            .result_type(TypeRef::named("User")),
    );

    config
}
