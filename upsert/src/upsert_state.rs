/// What [Context::upsert_by](crate::Context::upsert_by) did with the entity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpsertState {
    Inserted,
    Updated,
}
