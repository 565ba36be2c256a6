use upsert::{ByKey, Context, EntityDescriptor, Model, Result};
use upsert_mssql::{Mssql, MssqlFactory};

#[tokio::main]
async fn main() -> Result<()> {
    let provider = MssqlFactory::from_env("UPSERT_MSSQL_CONN")?.create_provider();
    let model = Model::builder().register::<User>().build();
    let ctx = Context::new(model, Mssql, provider);

    let user = User {
        id: 2,
        name: "Test2".to_string(),
        email: None,
    };

    let count = ctx.merge(&user).await?;
    println!("merge: {count} row(s) affected");

    let state = ctx.upsert_by(&user, ByKey(&user)).await?;
    println!("upsert_by: {state:?}");

    Ok(())
}

#[derive(EntityDescriptor)]
#[upsert(table = "[dbo].[users]", keys = "id")]
struct User {
    id: i32,
    name: String,
    #[upsert(column = "mail")]
    email: Option<String>,
}
