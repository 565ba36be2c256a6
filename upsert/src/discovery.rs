use crate::EntityInfo;

/// Narrows a list of entity types.
///
/// ```
/// use upsert::{EntityDescriptor, EntityInfoIterExt, Model};
///
/// trait SoftDelete {}
///
/// mod entities {
///     #[derive(upsert::EntityDescriptor)]
///     #[upsert(table = "Post", keys = "id")]
///     pub struct Post {
///         pub id: i32,
///     }
///
///     impl super::SoftDelete for Post {}
/// }
///
/// #[derive(EntityDescriptor)]
/// #[upsert(table = "Audit", keys = "id")]
/// struct Audit {
///     id: i64,
/// }
///
/// # fn main() {
/// let model = Model::builder()
///     .register_with::<entities::Post, _>(|r| {
///         r.implements::<dyn SoftDelete>(|e| e);
///     })
///     .register::<Audit>()
///     .build();
///
/// let soft = model.entity_types().implementing::<dyn SoftDelete>().count();
/// let in_entities = model.entity_types().in_module("entities").count();
///
/// assert_eq!((soft, in_entities), (1, 1));
/// # }
/// ```
pub trait EntityInfoIterExt<'a>: Iterator<Item = &'a EntityInfo> + Sized {
    /// Keeps the types registered as implementing `I`.
    fn implementing<I: ?Sized + 'static>(self) -> impl Iterator<Item = &'a EntityInfo> {
        self.filter(|info| info.implements::<I>())
    }

    /// Keeps the types declared under a module named `module`.
    fn in_module(self, module: &'a str) -> impl Iterator<Item = &'a EntityInfo> {
        self.filter(move |info| in_module(info.type_name(), module))
    }
}

impl<'a, T> EntityInfoIterExt<'a> for T where T: Iterator<Item = &'a EntityInfo> {}

/// `true` when one of the module segments of `path` is `module`.
fn in_module(path: &str, module: &str) -> bool {
    // generic arguments are not part of the type's own path.
    let path = path.split('<').next().unwrap_or(path);
    let mut segments = path.split("::").collect::<Vec<_>>();

    segments.pop();
    segments.iter().any(|s| *s == module)
}
