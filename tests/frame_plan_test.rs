use spinning_cubes::{
    data_structures::{
        cube::{CubeInstanceData, ROTATION_STEP},
        mesh::CUBE_VERTEX_COUNT,
        scene::{Scene, SceneDescription},
    },
    render::{DrawCall, FramePlan},
};

#[test]
fn should_plan_one_instanced_draw_for_the_default_scene() {
    let mut scene = Scene::from_description(&SceneDescription::default());
    let plan = FramePlan::build(&mut scene, 4.0 / 3.0);

    assert_eq!(
        plan.draw_calls,
        vec![DrawCall {
            vertices: 0..CUBE_VERTEX_COUNT,
            instances: 0..4,
        }]
    );
    assert_eq!(plan.instances.len(), 4);
}

#[test]
fn should_size_instance_bytes_by_cube_count() {
    let mut scene = Scene::from_description(&SceneDescription::default());
    for _ in 0..3 {
        let plan = FramePlan::build(&mut scene, 1.0);
        assert_eq!(
            plan.instance_bytes().len(),
            scene.len() * std::mem::size_of::<CubeInstanceData>()
        );
    }
}

#[test]
fn should_advance_scene_once_per_planned_frame() {
    let mut scene = Scene::from_description(&SceneDescription::default());
    let first = FramePlan::build(&mut scene, 1.0);
    let second = FramePlan::build(&mut scene, 1.0);

    assert_ne!(first.instances, second.instances);
    let angle = scene.cubes()[0].rotation_angle();
    assert!((angle - 2.0 * ROTATION_STEP).abs() < 1e-6);
}

#[test]
fn should_plan_no_draw_for_an_empty_scene() {
    let mut scene = Scene::from_description(&SceneDescription { cubes: vec![] });
    let plan = FramePlan::build(&mut scene, 1.0);
    assert!(plan.draw_calls.is_empty());
    assert!(plan.instance_bytes().is_empty());
}
