mod common;

use common::{ConstraintViolation, FakeStore};
use upsert::{
    dialect::Mssql, And, ByKey, ColumnEq, Context, EntityDescriptor, Error, Model, Raw, Result,
    UpsertState, Value,
};

#[derive(EntityDescriptor)]
#[upsert(table = "dbo.User", keys = "id")]
struct User {
    id: i64,
    login: String,
    active: bool,
}

#[derive(EntityDescriptor)]
#[upsert(table = "Tag", keys = "name")]
struct Tag {
    name: String,
}

#[derive(EntityDescriptor)]
#[upsert(table = "Event")]
struct Event {
    payload: String,
}

fn create_ctx() -> Context<FakeStore> {
    let model = Model::builder()
        .register::<User>()
        .register::<Tag>()
        .register::<Event>()
        .build();

    let store = FakeStore::default()
        .with_table("dbo.User", &["id", "login", "active"], &["id"])
        .with_table("Tag", &["name"], &["name"])
        .with_table("Event", &["payload"], &[]);

    Context::new(model, Mssql, store)
}

fn user(login: &str, active: bool) -> User {
    User {
        id: 1,
        login: login.into(),
        active,
    }
}

#[tokio::test]
async fn inserts_then_updates() -> Result<()> {
    let ctx = create_ctx();

    let u = user("alice", true);
    assert_eq!(ctx.upsert_by(&u, ByKey(&u)).await?, UpsertState::Inserted);

    let u = user("alice", false);
    assert_eq!(ctx.upsert_by(&u, ByKey(&u)).await?, UpsertState::Updated);

    let rows = ctx.provider().rows("dbo.User");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][2], Value::from(false));

    Ok(())
}

#[tokio::test]
async fn lookup_on_any_column() -> Result<()> {
    let ctx = create_ctx();

    ctx.upsert_by(&user("alice", true), ColumnEq("login", "alice".into())).await?;

    let state = ctx
        .upsert_by(
            &user("alice", false),
            And(ColumnEq("login", "alice".into()), ColumnEq("active", true.into())),
        )
        .await?;

    assert_eq!(state, UpsertState::Updated);

    let (lookup, params) = ctx.provider().log().swap_remove(2);

    assert_eq!(
        lookup,
        "SELECT TOP 1 1 FROM [dbo].[User] WHERE ([login]=@p1) AND ([active]=@p2)"
    );
    assert_eq!(params, vec![Value::from("alice"), Value::from(true)]);

    Ok(())
}

#[tokio::test]
async fn commands_sent_to_the_store() -> Result<()> {
    let ctx = create_ctx();
    let u = user("alice", true);

    ctx.upsert_by(&u, ByKey(&u)).await?;
    ctx.upsert_by(&u, ByKey(&u)).await?;

    let sql = ctx.provider().log().into_iter().map(|t| t.0).collect::<Vec<_>>();

    assert_eq!(
        sql,
        vec![
            "SELECT TOP 1 1 FROM [dbo].[User] WHERE ([id]=@p1)",
            "INSERT INTO [dbo].[User] ([id],[login],[active]) VALUES (@p1,@p2,@p3)",
            "SELECT TOP 1 1 FROM [dbo].[User] WHERE ([id]=@p1)",
            "UPDATE [dbo].[User] SET [login]=@p2,[active]=@p3 WHERE ([id]=@p1)",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn found_row_with_only_keys_is_left_as_is() -> Result<()> {
    let ctx = create_ctx();
    let t = Tag { name: "rust".into() };

    assert_eq!(ctx.upsert_by(&t, ByKey(&t)).await?, UpsertState::Inserted);
    assert_eq!(ctx.upsert_by(&t, ByKey(&t)).await?, UpsertState::Updated);

    // lookup, insert, lookup.
    assert_eq!(ctx.provider().log().len(), 3);

    Ok(())
}

#[tokio::test]
async fn keyless_type_is_rejected() {
    let ctx = create_ctx();
    let e = Event { payload: "x".into() };

    let err = ctx
        .upsert_by(&e, ColumnEq("payload", "x".into()))
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::NoPrimaryKey { table } if table == "Event"));
    assert!(ctx.provider().log().is_empty());
}

#[tokio::test]
async fn empty_filter_never_reaches_store() {
    let ctx = create_ctx();
    let u = user("alice", true);
    let e = Event { payload: "x".into() };

    // a keyless entity renders no key condition.
    let err = ctx.upsert_by(&u, ByKey(&e)).await.unwrap_err();
    assert!(matches!(&err, Error::EmptyFilter { table } if table == "dbo.User"));

    let err = ctx.upsert_by(&u, Raw("", Vec::new())).await.unwrap_err();
    assert!(err.is_metadata());

    assert!(ctx.provider().log().is_empty());
    assert!(ctx.provider().rows("dbo.User").is_empty());
}

#[tokio::test]
async fn lookup_failure_stops_before_write() {
    let ctx = create_ctx();
    let u = user("alice", true);

    ctx.provider().fail_next("timeout");

    let err = ctx.upsert_by(&u, ByKey(&u)).await.unwrap_err();

    assert!(err.store_error().unwrap().is::<ConstraintViolation>());
    assert_eq!(ctx.provider().log().len(), 1);
    assert!(ctx.provider().rows("dbo.User").is_empty());
}

#[test]
fn blocking_upsert() -> Result<()> {
    let ctx = create_ctx();
    let u = user("bob", true);

    assert_eq!(ctx.upsert_by_blocking(&u, ByKey(&u))?, UpsertState::Inserted);
    assert_eq!(ctx.upsert_by_blocking(&u, ByKey(&u))?, UpsertState::Updated);

    Ok(())
}
