//! Scene host abstraction.
//!
//! Generation never talks to an engine directly. It asks a [`SceneHost`] to
//! create an anchor, spawn prefabs under it and destroy handles, so the same
//! placement code runs against a Bevy `World` or the headless [`MemoryHost`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt::Debug;

use bevy::math::{Quat, Vec3};

use crate::prefab::PrefabId;

/// Capability for instantiating and tearing down scene objects.
pub trait SceneHost {
    /// Handle to a live scene object (anchor or spawned instance).
    type Handle: Copy + Eq + Debug;

    /// Create an empty container object that spawned instances are parented to.
    fn create_anchor(&mut self, name: &str) -> Self::Handle;

    /// Instantiate `prefab` as a child of `parent` with the given local transform.
    ///
    /// Returns `None` when the host cannot instantiate the prefab.
    fn spawn(
        &mut self,
        prefab: PrefabId,
        local_position: Vec3,
        local_rotation: Quat,
        parent: Self::Handle,
    ) -> Option<Self::Handle>;

    /// Destroy `handle` and all of its descendants.
    ///
    /// Destroying a handle that no longer exists is a no-op.
    fn destroy(&mut self, handle: Self::Handle);
}

/// Identifier of a node in a [`MemoryHost`].
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct NodeId(u32);

/// A node stored by the [`MemoryHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    /// Prefab this node was instantiated from; `None` for anchors.
    pub prefab: Option<PrefabId>,
    pub parent: Option<NodeId>,
    pub local_position: Vec3,
    pub local_rotation: Quat,
}

/// Headless scene host backed by an arena of nodes keyed by parent.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: BTreeMap<NodeId, SceneNode>,
    children: HashMap<NodeId, BTreeSet<NodeId>>,
    next_id: u32,
    /// When set, only these prefabs can be spawned.
    known_prefabs: Option<HashSet<PrefabId>>,
}

impl MemoryHost {
    /// Create a host that accepts every prefab id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host that only knows the given prefabs; spawning any other id fails.
    pub fn with_prefabs(prefabs: impl IntoIterator<Item = PrefabId>) -> Self {
        Self {
            known_prefabs: Some(prefabs.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Total number of live nodes, anchors included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Iterate over every live node in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Direct children of `id`.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.children
            .get(&id)
            .map(|children| children.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether `id` sits somewhere below `ancestor`.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes.get(&id).and_then(|node| node.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).and_then(|node| node.parent);
        }
        false
    }

    /// Number of live nodes instantiated from a prefab (anchors excluded).
    pub fn instance_count(&self) -> usize {
        self.nodes.values().filter(|node| node.prefab.is_some()).count()
    }

    fn insert(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        if let Some(parent) = node.parent {
            self.children.entry(parent).or_default().insert(id);
        }
        self.nodes.insert(id, node);
        id
    }
}

impl SceneHost for MemoryHost {
    type Handle = NodeId;

    fn create_anchor(&mut self, name: &str) -> NodeId {
        self.insert(SceneNode {
            name: name.to_string(),
            prefab: None,
            parent: None,
            local_position: Vec3::ZERO,
            local_rotation: Quat::IDENTITY,
        })
    }

    fn spawn(
        &mut self,
        prefab: PrefabId,
        local_position: Vec3,
        local_rotation: Quat,
        parent: NodeId,
    ) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        if let Some(known) = &self.known_prefabs {
            if !known.contains(&prefab) {
                return None;
            }
        }

        Some(self.insert(SceneNode {
            name: format!("Prefab_{}", prefab.0),
            prefab: Some(prefab),
            parent: Some(parent),
            local_position,
            local_rotation,
        }))
    }

    fn destroy(&mut self, handle: NodeId) {
        let Some(node) = self.nodes.remove(&handle) else {
            return;
        };
        if let Some(parent) = node.parent {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.remove(&handle);
            }
        }

        // Descendants go with their parent.
        for child in self.children.remove(&handle).unwrap_or_default() {
            self.destroy(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destroy_is_recursive() {
        let mut host = MemoryHost::new();
        let anchor = host.create_anchor("root");
        let a = host.spawn(PrefabId(1), Vec3::ZERO, Quat::IDENTITY, anchor).unwrap();
        let b = host.spawn(PrefabId(2), Vec3::X, Quat::IDENTITY, a).unwrap();
        assert!(host.is_descendant_of(b, anchor));

        host.destroy(anchor);
        assert!(host.is_empty());
        assert!(!host.contains(b));
    }

    #[test]
    fn destroy_missing_handle_is_noop() {
        let mut host = MemoryHost::new();
        let anchor = host.create_anchor("root");
        host.destroy(anchor);
        host.destroy(anchor);
        assert!(host.is_empty());
    }

    #[test]
    fn destroying_a_child_unlinks_it() {
        let mut host = MemoryHost::new();
        let anchor = host.create_anchor("root");
        let parts: Vec<_> = (0..4)
            .map(|i| host.spawn(PrefabId(i), Vec3::ZERO, Quat::IDENTITY, anchor).unwrap())
            .collect();

        host.destroy(parts[1]);
        assert_eq!(host.children(anchor), vec![parts[0], parts[2], parts[3]]);

        for part in parts {
            host.destroy(part);
        }
        assert!(host.children(anchor).is_empty());
        assert_eq!(host.len(), 1);
        host.destroy(anchor);
        assert!(host.is_empty());
    }

    #[test]
    fn unknown_prefab_fails_to_spawn() {
        let mut host = MemoryHost::with_prefabs([PrefabId(1)]);
        let anchor = host.create_anchor("root");
        assert!(host.spawn(PrefabId(1), Vec3::ZERO, Quat::IDENTITY, anchor).is_some());
        assert!(host.spawn(PrefabId(9), Vec3::ZERO, Quat::IDENTITY, anchor).is_none());
        assert_eq!(host.instance_count(), 1);
    }

    #[test]
    fn spawn_under_missing_parent_fails() {
        let mut host = MemoryHost::new();
        let anchor = host.create_anchor("root");
        host.destroy(anchor);
        assert!(host.spawn(PrefabId(1), Vec3::ZERO, Quat::IDENTITY, anchor).is_none());
    }
}
