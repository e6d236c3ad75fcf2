#![allow(dead_code)]

use spinning_cubes::Matrix4;

pub const EPSILON: f32 = 1e-5;

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() <= EPSILON,
        "expected {} but got {}",
        expected,
        actual
    );
}

pub fn assert_matrix_close(actual: Matrix4<f32>, expected: Matrix4<f32>) {
    let actual: [[f32; 4]; 4] = actual.into();
    let expected: [[f32; 4]; 4] = expected.into();
    for col in 0..4 {
        for row in 0..4 {
            assert!(
                (actual[col][row] - expected[col][row]).abs() <= EPSILON,
                "mismatch at column {} row {}: expected {:?} but got {:?}",
                col,
                row,
                expected,
                actual
            );
        }
    }
}
