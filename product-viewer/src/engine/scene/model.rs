use bevy::prelude::*;

use crate::engine::error::ViewerError;

/// Marker on the spawned glTF scene root.
#[derive(Component)]
pub struct ProductModel;

/// Material of the object that receives texture swaps, with the texture it shipped with.
#[derive(Resource, Default, Debug, Clone)]
pub struct BaseSurface {
    pub object: Option<Entity>,
    pub material: Option<Handle<StandardMaterial>>,
    pub original_texture: Option<Handle<Image>>,
}

impl BaseSurface {
    pub fn is_bound(&self) -> bool {
        self.material.is_some()
    }
}

/// Entity carrying exactly `name`, searched below `root`.
pub fn find_named_descendant(
    root: Entity,
    name: &str,
    children: &Query<&Children>,
    names: &Query<&Name>,
) -> Option<Entity> {
    std::iter::once(root)
        .chain(children.iter_descendants(root))
        .find(|e| names.get(*e).is_ok_and(|n| n.as_str() == name))
}

/// First entity below `root` whose name contains `keyword`.
pub fn find_descendant_containing(
    root: Entity,
    keyword: &str,
    children: &Query<&Children>,
    names: &Query<&Name>,
) -> Option<Entity> {
    children
        .iter_descendants(root)
        .find(|e| names.get(*e).is_ok_and(|n| n.as_str().contains(keyword)))
}

/// Standard material on `object` or, for glTF nodes, on one of its mesh primitives.
pub fn find_object_material(
    object: Entity,
    object_name: &str,
    children: &Query<&Children>,
    materials: &Query<&MeshMaterial3d<StandardMaterial>>,
) -> Result<Handle<StandardMaterial>, ViewerError> {
    std::iter::once(object)
        .chain(children.iter_descendants(object))
        .find_map(|e| materials.get(e).ok().map(|m| m.0.clone()))
        .ok_or_else(|| ViewerError::MaterialMissing(object_name.to_string()))
}

/// Names on the hit entity and its ancestors, nearest first.
pub fn names_from_hit(
    hit: Entity,
    parents: &Query<&ChildOf>,
    names: &Query<&Name>,
) -> Vec<String> {
    std::iter::once(hit)
        .chain(parents.iter_ancestors(hit))
        .filter_map(|e| names.get(e).ok().map(|n| n.as_str().to_string()))
        .collect()
}
