mod common;

use common::synthetic_segments::{point_on_ray, IMAGE_H, IMAGE_W, SIDE_VP};
use offside_vp::{Point, Scene, SceneError, VpMode, VpState};

fn snapshot(scene: &Scene) -> (Vec<offside_vp::scene::SceneLine>, VpState) {
    (scene.lines().to_vec(), scene.vp_state())
}

fn add_pitch_line(scene: &mut Scene, y0: f64) {
    scene
        .add_reference_line(point_on_ray(SIDE_VP, y0, 0.0), point_on_ray(SIDE_VP, y0, 1000.0))
        .unwrap();
}

#[test]
fn editing_session_undoes_and_redoes_every_step_exactly() {
    let mut scene = Scene::with_image_size(IMAGE_W, IMAGE_H);
    let mut states = vec![snapshot(&scene)];

    add_pitch_line(&mut scene, 300.0);
    states.push(snapshot(&scene));
    add_pitch_line(&mut scene, 600.0);
    states.push(snapshot(&scene));
    let anchor = Point::new(500.0, 650.0);
    let vp_line = scene.add_vp_line(anchor).unwrap();
    states.push(snapshot(&scene));
    scene.nudge_vp(-40.0, 25.0).unwrap();
    states.push(snapshot(&scene));
    add_pitch_line(&mut scene, 450.0);
    states.push(snapshot(&scene));
    scene.recalculate_vp();
    states.push(snapshot(&scene));
    let first = scene.reference_lines().next().unwrap().id;
    scene.remove_line(first).unwrap();
    states.push(snapshot(&scene));

    let final_state = states.last().unwrap().clone();
    for expected in states.iter().rev().skip(1) {
        scene.undo().unwrap();
        assert_eq!(&snapshot(&scene), expected);
    }
    assert_eq!(scene.undo(), Err(SceneError::NothingToUndo));

    for expected in states.iter().skip(1) {
        scene.redo().unwrap();
        assert_eq!(&snapshot(&scene), expected);
    }
    assert_eq!(snapshot(&scene), final_state);
    assert!(scene.line(vp_line).is_some());
}

#[test]
fn manual_vp_moves_offside_lines_and_recalculation_restores_them() {
    let mut scene = Scene::with_image_size(IMAGE_W, IMAGE_H);
    add_pitch_line(&mut scene, 300.0);
    add_pitch_line(&mut scene, 600.0);
    let computed = scene.vanishing_point().unwrap();
    assert!(computed.distance(&SIDE_VP) < 1e-6);

    let proj = scene
        .add_player_projection(Point::new(400.0, 350.0), Point::new(410.0, 560.0))
        .unwrap();
    let offside = proj.vp_line.unwrap();
    let initial = scene.line(offside).unwrap().line;

    let manual = Point::new(3000.0, 200.0);
    scene.set_manual_vp(manual);
    assert_eq!(scene.vp_state(), VpState::Manual(manual));
    let moved = scene.line(offside).unwrap().line;
    assert!(moved.distance(&manual) < 1e-9);
    assert!(moved.distance(&proj.ground) < 1e-9);

    // Reference edits leave a manual VP alone.
    add_pitch_line(&mut scene, 450.0);
    assert_eq!(scene.vanishing_point(), Some(manual));

    let recalculated = scene.recalculate_vp().unwrap();
    assert_eq!(scene.vp_state().mode(), VpMode::Computed);
    assert!(recalculated.distance(&SIDE_VP) < 1e-6);
    let restored = scene.line(offside).unwrap().line;
    assert!(restored.distance(&proj.ground) < 1e-9);
    assert!(restored.distance(&initial.p1()) < 1e-3);
    // The plumb line never moves with the VP.
    assert_eq!(
        scene.line(proj.plumb).unwrap().line.p2(),
        Point::new(400.0, 560.0)
    );
}

#[test]
fn hit_testing_and_removal() {
    let mut scene = Scene::with_image_size(IMAGE_W, IMAGE_H);
    add_pitch_line(&mut scene, 300.0);
    add_pitch_line(&mut scene, 600.0);
    let on_second = point_on_ray(SIDE_VP, 600.0, 200.0).offset(0.0, 5.0);
    let hit = scene.line_at(on_second, 12.0).expect("line within tolerance");
    let removed = scene.remove_line(hit).unwrap();
    assert!(removed.is_reference());
    assert_eq!(scene.vp_state(), VpState::None);
    assert_eq!(scene.line_at(on_second, 12.0), None);
}

#[test]
fn reset_for_new_image_can_keep_lines() {
    let mut scene = Scene::with_image_size(IMAGE_W, IMAGE_H);
    add_pitch_line(&mut scene, 300.0);
    add_pitch_line(&mut scene, 600.0);
    let before = snapshot(&scene);

    scene.reset(true);
    scene.set_image_size(1920.0, 1080.0);
    assert_eq!(snapshot(&scene), before);
    assert!(scene.can_undo());

    scene.reset(false);
    assert!(scene.lines().is_empty());
    assert_eq!(scene.vanishing_point(), None);
    assert!(!scene.can_undo() && !scene.can_redo());
}
