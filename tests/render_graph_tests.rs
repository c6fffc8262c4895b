//! Render Graph and Resource Pool Tests
//!
//! Tests for:
//! - RenderFrame ordering by (priority, insertion index) next to host passes
//! - find_or_create idempotence and clear options of the overlay passes
//! - ResourcePool disposal bookkeeping with procedural gizmo shapes

use glam::{Vec3, Vec4};

use myth_gizmo::gizmo::{OverlayPasses, PassClass};
use myth_gizmo::graph::{ClearOptions, RenderPassDescriptor};
use myth_gizmo::resources::primitives::{create_arrow, create_grid, create_torus};
use myth_gizmo::resources::{DestroyOptions, MeshDisposeOptions};
use myth_gizmo::{
    Material, RENDER_PASS_PRIORITY_NORMAL, RENDER_PASS_PRIORITY_PREPARE, RenderFrame, RenderPass,
    ResourcePool,
};

fn names(frame: &RenderFrame) -> Vec<&str> {
    frame.render_passes().iter().map(RenderPass::name).collect()
}

// ============================================================================
// Pass ordering
// ============================================================================

#[test]
fn overlay_passes_sort_after_host_passes() {
    let passes = OverlayPasses::default();
    let mut frame = RenderFrame::new();
    frame.add_render_pass(&RenderPassDescriptor {
        name: "main",
        priority: RENDER_PASS_PRIORITY_NORMAL,
        clear: ClearOptions::LOAD,
    });

    frame.find_or_create(&passes.descriptor(PassClass::Behind));
    frame.find_or_create(&passes.descriptor(PassClass::EditorDefault));
    frame.find_or_create(&passes.descriptor(PassClass::Front));
    frame.add_render_pass(&RenderPassDescriptor {
        name: "prepare",
        priority: RENDER_PASS_PRIORITY_PREPARE,
        clear: ClearOptions::LOAD,
    });

    assert_eq!(
        names(&frame),
        vec!["prepare", "main", "editor-gizmo", "front-gizmo", "behind-gizmo"]
    );
}

#[test]
fn find_or_create_never_duplicates_overlay_passes() {
    let passes = OverlayPasses::default();
    let mut frame = RenderFrame::new();

    for _ in 0..3 {
        for class in PassClass::ALL {
            frame.find_or_create(&passes.descriptor(class));
        }
    }
    assert_eq!(frame.render_passes().len(), 3);
}

#[test]
fn insertion_index_is_stable() {
    let mut frame = RenderFrame::new();
    let desc = |name| RenderPassDescriptor {
        name,
        priority: 10,
        clear: ClearOptions::LOAD,
    };
    frame.add_render_pass(&desc("a"));
    frame.add_render_pass(&desc("b"));

    let a = frame.find_pass("a").unwrap().sort_key();
    let b = frame.find_pass("b").unwrap().sort_key();
    assert!(a < b);

    frame.add_render_pass(&desc("c"));
    assert_eq!(frame.find_pass("a").unwrap().sort_key(), a);
}

#[test]
fn routing_is_pure() {
    for name in ["FloorGrid", "Box", "rotation", "camera", "unknown", ""] {
        let first = myth_gizmo::route(name);
        for _ in 0..4 {
            assert_eq!(myth_gizmo::route(name), first);
        }
    }
}

// ============================================================================
// Resource pool
// ============================================================================

#[test]
fn pool_tracks_bytes_of_gizmo_shapes() {
    let mut pool = ResourcePool::new();
    let grid = pool.create_mesh("FloorGrid", create_grid(10.0, 10), Material::default());
    let torus = pool.create_mesh("torus", create_torus(1.0, 0.2), Material::default());
    let arrow = pool.create_mesh("translation", create_arrow(Vec3::X, 1.0), Material::default());

    let before = pool.stats();
    assert_eq!(before.live_meshes, 3);
    assert!(before.bytes > 0);

    pool.dispose_mesh(grid, MeshDisposeOptions::FULL);
    pool.dispose_mesh(torus, MeshDisposeOptions::FULL);
    let after = pool.stats();
    assert!(after.bytes < before.bytes);
    assert_eq!(after.live_meshes, 1);
    assert_eq!(after.destroyed_meshes, 2);
    assert!(!pool.is_mesh_destroyed(arrow));
}

#[test]
fn kept_material_survives_until_released_by_owner() {
    let mut pool = ResourcePool::new();
    let material = pool.add_material(Material::new("shared", Vec4::ONE));
    let geometry = pool.add_geometry(create_grid(1.0, 1));
    let mesh = pool.add_mesh(myth_gizmo::Mesh::new("FloorGrid", geometry, material));

    assert!(pool.dispose_mesh(mesh, MeshDisposeOptions::KEEP_MATERIAL));
    assert!(pool.material(material).is_some());
    assert!(pool.geometry(geometry).is_none());

    assert!(pool.release_material(material, DestroyOptions::Destroy));
    assert_eq!(pool.released().materials, 1);
}
