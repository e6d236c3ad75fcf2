use spinning_cubes::{
    Matrix4, Rad, SquareMatrix, Vector3, Vector4,
    data_structures::cube::{
        CUBE_SCALE, Cube, CubeInstanceData, ROTATION_STEP, VIEW_OFFSET, projection, rotation_x,
        rotation_y,
    },
};

use crate::common::{assert_close, assert_matrix_close};

mod common;

fn red_cube() -> Cube {
    Cube::new(Vector3::new(0.2, 0.0, 0.0), Vector4::new(1.0, 0.0, 0.0, 1.0))
}

#[test]
fn should_advance_rotation_by_one_step_per_update() {
    let mut cube = red_cube();
    assert_eq!(cube.rotation_angle(), 0.0);

    cube.update_transform(1.0);
    assert_eq!(cube.rotation_angle(), ROTATION_STEP);

    cube.update_transform(1.0);
    assert_close(cube.rotation_angle(), 2.0 * ROTATION_STEP);
}

#[test]
fn should_return_transform_for_the_advanced_angle_and_fixed_colour() {
    let mut cube = red_cube();
    let data = cube.update_transform(16.0 / 9.0);

    let expected: [[f32; 4]; 4] = cube.transform(16.0 / 9.0).into();
    assert_eq!(data.transform, expected);
    assert_eq!(data.color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(cube.position(), Vector3::new(0.2, 0.0, 0.0));
}

#[test]
fn should_compose_identical_matrices_for_identical_inputs() {
    let mut a = red_cube();
    let mut b = red_cube();
    for _ in 0..10 {
        assert_eq!(a.update_transform(1.5), b.update_transform(1.5));
    }
    // Reading the transform has no side effects.
    assert_eq!(a.transform(1.5), a.transform(1.5));
    assert_eq!(a.rotation_angle(), b.rotation_angle());
}

#[test]
fn should_compose_projection_view_and_model_in_order() {
    let cube = red_cube();
    let expected = projection(2.0) * Matrix4::from_translation(VIEW_OFFSET.into()) * cube.model();
    assert_matrix_close(cube.transform(2.0), expected);

    let tilt = std::f32::consts::FRAC_PI_6;
    let model = Matrix4::from_translation(Vector3::new(0.2, 0.0, 0.0))
        * rotation_x(0.0)
        * rotation_y(tilt)
        * rotation_x(tilt)
        * Matrix4::from_scale(CUBE_SCALE);
    assert_matrix_close(cube.model(), model);
}

#[test]
fn should_place_cube_centre_at_its_position() {
    let mut cube = Cube::new(Vector3::new(0.0, 0.2, 0.0), Vector4::new(0.0, 1.0, 0.0, 1.0));
    cube.update_transform(1.0);
    let centre = cube.model() * Vector4::new(0.0, 0.0, 0.0, 1.0);
    assert_close(centre.x, 0.0);
    assert_close(centre.y, 0.2);
    assert_close(centre.z, 0.0);
    assert_close(centre.w, 1.0);
}

#[test]
fn should_scale_the_unit_mesh_down_to_a_tenth() {
    let cube = Cube::new(Vector3::new(0.0, 0.0, 0.0), Vector4::new(1.0, 1.0, 0.0, 1.0));
    let corner = cube.model() * Vector4::new(0.5, 0.5, 0.5, 1.0);
    let length = (corner.x * corner.x + corner.y * corner.y + corner.z * corner.z).sqrt();
    // Rotations keep lengths, so only the scale shows.
    assert_close(length, 0.1 * (0.75f32).sqrt());
}

#[test]
fn should_build_symmetric_projection_for_square_aspect() {
    let m = projection(1.0);
    assert_close(m.x.x, m.y.y);

    let y_scale = 1.0 / (15.0f32.to_radians()).tan();
    assert_close(m.y.y, y_scale);
    assert_close(m.z.w, -1.0);
    assert_close(m.z.z, -(100.0 + 0.1) / (100.0 - 0.1));
    assert_close(m.w.z, -2.0 * 100.0 * 0.1 / (100.0 - 0.1));
    assert_close(m.w.w, 0.0);
}

#[test]
fn should_divide_horizontal_scale_by_aspect() {
    let m = projection(2.0);
    assert_close(m.x.x, m.y.y / 2.0);
}

#[test]
fn should_map_near_and_far_planes_to_unit_depth_range() {
    let m = projection(1.0);
    let near = m * Vector4::new(0.0, 0.0, -0.1, 1.0);
    let far = m * Vector4::new(0.0, 0.0, -100.0, 1.0);
    assert_close(near.z / near.w, -1.0);
    assert!((far.z / far.w - 1.0).abs() < 1e-3);
}

#[test]
fn should_rotate_about_x_following_right_hand_rule() {
    let angle = 0.7;
    assert_matrix_close(rotation_x(angle), Matrix4::from_angle_x(Rad(angle)));
}

#[test]
fn should_keep_mirrored_sign_convention_for_y_rotation() {
    let angle = 0.7;
    assert_matrix_close(rotation_y(angle), Matrix4::from_angle_y(Rad(-angle)));
    assert_matrix_close(rotation_y(angle) * rotation_y(-angle), Matrix4::identity());

    // +X turns towards +Z instead of -Z.
    let x = rotation_y(std::f32::consts::FRAC_PI_2) * Vector4::new(1.0, 0.0, 0.0, 0.0);
    assert_close(x.x, 0.0);
    assert_close(x.z, 1.0);
}

#[test]
fn should_pack_instance_data_as_mat4_and_vec4() {
    assert_eq!(std::mem::size_of::<CubeInstanceData>(), 80);
}
