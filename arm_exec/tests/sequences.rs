//! End to end behaviour of the controller, from command tokens to joint angles

mod common;

use arm_lib::{
    data_store::DataStore,
    dispatcher::{DispatchState, Dispatcher, Outcome},
    interp::{self, angle_to_pulse},
    joints::JointId,
    sequences::SequenceId,
    servo_ctrl::SimDriver,
};
use common::{homed_dispatcher, BrokenChannel, RecDelay, RecLink};

const HOME: [u8; 6] = [17, 40, 40, 126, 56, 0];

#[test]
fn test_startup_homes_every_joint() {
    let disp = homed_dispatcher();
    let ds = disp.data_store();

    assert_eq!(ds.positions.angles(), HOME);
    for j in ds.registry.iter() {
        assert_eq!(ds.driver.pulse(j.channel), Some(angle_to_pulse(j.home_deg)));
    }
    // Home positioning is instant, nothing waits
    assert!(ds.delay.0.is_empty());
}

#[test]
fn test_approach_then_grab() {
    let mut disp = homed_dispatcher();
    let mut link = RecLink::default();

    assert_eq!(
        disp.dispatch("BTN_A", &mut link),
        Outcome::Completed(SequenceId::Approach)
    );
    assert_eq!(disp.data_store().positions.angles(), [0, 0, 32, 108, 85, 98]);

    assert_eq!(disp.dispatch("B", &mut link), Outcome::Completed(SequenceId::Grab));
    assert_eq!(disp.data_store().positions.angles(), [0, 0, 32, 108, 85, 115]);

    match disp.dispatch("STATUS", &mut link) {
        Outcome::Status(text) => {
            assert!(text.contains("Elbow    (port  7):  32 deg"));
            assert!(text.contains("Gripper  (port 15): 115 deg"));
        }
        o => panic!("Expected a status dump, got {:?}", o),
    }

    assert_eq!(link.replies[..2], ["OK Approach".to_string(), "OK Grab".to_string()]);
    assert_eq!(link.replies.len(), 3);
}

#[test]
fn test_drop_and_release() {
    let mut disp = homed_dispatcher();
    let mut link = RecLink::default();

    disp.dispatch("A", &mut link);
    disp.dispatch("BTN_B", &mut link);
    assert_eq!(disp.dispatch("X", &mut link), Outcome::Completed(SequenceId::Drop));
    assert_eq!(disp.data_store().positions.angles(), [80, 110, 32, 97, 100, 115]);

    assert_eq!(
        disp.dispatch("BTN_Y", &mut link),
        Outcome::Completed(SequenceId::Release)
    );
    assert_eq!(disp.data_store().positions.angles(), [80, 110, 32, 97, 100, 0]);
}

#[test]
fn test_reset_returns_home_from_anywhere() {
    for token in ["BTN_START", "RESET"].iter() {
        let mut disp = homed_dispatcher();
        let mut link = RecLink::default();

        disp.dispatch("A", &mut link);
        disp.dispatch("X", &mut link);
        assert_ne!(disp.data_store().positions.angles(), HOME);

        assert_eq!(
            disp.dispatch(token, &mut link),
            Outcome::Completed(SequenceId::Home)
        );
        assert_eq!(disp.data_store().positions.angles(), HOME);
        assert_eq!(link.replies.last().map(String::as_str), Some("OK Home"));
    }
}

#[test]
fn test_sequence_timing() {
    let mut disp = homed_dispatcher();
    let mut link = RecLink::default();

    disp.dispatch("B", &mut link);

    // Gripper 0 -> 115 in one degree steps, then the final settle
    let mut expected = vec![interp::STEP_DELAY_MS; 115];
    expected.push(500);
    assert_eq!(disp.data_store().delay.0, expected);
}

#[test]
fn test_commands_while_busy_do_not_move_the_arm() {
    let mut disp = homed_dispatcher();
    let mut link = RecLink {
        pending: vec!["BTN_A".into(), "RESET".into(), "FOO".into()],
        ..Default::default()
    };

    assert_eq!(disp.dispatch("Y", &mut link), Outcome::Completed(SequenceId::Release));

    // Release found the gripper already open, so only the dropped commands were answered
    assert_eq!(link.replies, vec!["OK Release", "BUSY", "BUSY", "BUSY"]);
    assert_eq!(disp.data_store().positions.angles(), HOME);
    assert_eq!(disp.state(), DispatchState::Idle);
}

#[test]
fn test_map_is_fixed() {
    let mut disp = homed_dispatcher();
    let mut link = RecLink::default();

    let first = disp.dispatch("MAP", &mut link);
    disp.dispatch("A", &mut link);
    disp.dispatch("RESET", &mut link);
    let second = disp.dispatch("MAP", &mut link);

    assert_eq!(first, second);
    let channels: Vec<u8> = disp.data_store().registry.iter().map(|j| j.channel).collect();
    assert_eq!(channels, vec![1, 4, 7, 8, 11, 15]);
}

#[test]
fn test_every_move_lands_on_the_clamped_target() {
    let mut ds = DataStore::new(SimDriver::new(), RecDelay::default());

    for &joint in JointId::ALL.iter() {
        for &target in [-40, 0, 1, 90, 179, 180, 181, 500].iter() {
            let clamped = interp::clamp_angle(target);

            interp::instant_move(&mut ds, joint, target).unwrap();
            assert_eq!(ds.positions.get(joint), clamped);

            interp::instant_move(&mut ds, joint, 90).unwrap();
            interp::smooth_move(&mut ds, joint, target, &mut || ()).unwrap();
            assert_eq!(ds.positions.get(joint), clamped);

            let channel = ds.registry.joint(joint).channel;
            assert_eq!(ds.driver.pulse(channel), Some(angle_to_pulse(clamped)));
        }
    }
}

#[test]
fn test_driver_fault_aborts_sequence() {
    let mut ds = DataStore::new(
        BrokenChannel { sim: SimDriver::new(), channel: 7 },
        RecDelay::default(),
    );
    // Home positioning stops at the elbow
    assert!(ds.home().is_err());
    let mut disp = Dispatcher::new(ds);
    let mut link = RecLink::default();

    match disp.dispatch("A", &mut link) {
        Outcome::Faulted(SequenceId::Approach, msg) => assert!(msg.contains("Elbow")),
        o => panic!("Expected a fault, got {:?}", o),
    }

    let angles = disp.data_store().positions.angles();
    // Base and shoulder moved before the elbow faulted, nothing after it did
    assert_eq!(angles[0], 0);
    assert_eq!(angles[1], 0);
    assert_eq!(angles[3], 90);
    assert_eq!(disp.state(), DispatchState::Idle);

    // The dispatcher is still usable after a fault
    assert!(matches!(disp.dispatch("STATUS", &mut link), Outcome::Status(_)));
}
