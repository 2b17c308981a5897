use std::{io::Write, time::Duration};

use crossbeam_channel::bounded;
use finger_counter::{
    DetectorOptions, FrameSize,
    pipeline::{ReplaySource, SessionController, start_counting_session},
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn landmarks(overrides: &[(usize, f32, f32)]) -> String {
    let mut points = vec![(0.5f32, 0.5f32); 21];
    for &(index, x, y) in overrides {
        points[index] = (x, y);
    }
    points
        .iter()
        .map(|(x, y)| format!(r#"{{"x":{x},"y":{y},"z":0.0}}"#))
        .collect::<Vec<_>>()
        .join(",")
}

fn hand(handedness: &str, score: f32, overrides: &[(usize, f32, f32)]) -> String {
    format!(
        r#"{{"handedness":"{handedness}","score":{score},"landmarks":[{}]}}"#,
        landmarks(overrides)
    )
}

fn frame(hands: &[String]) -> String {
    format!(r#"{{"hands":[{}]}}"#, hands.join(","))
}

// thumb out, index up, middle down, ring up, pinky down
fn three_fingers_right() -> String {
    hand(
        "Right",
        0.9,
        &[
            (4, 0.6, 0.5),
            (2, 0.4, 0.5),
            (8, 0.5, 0.2),
            (6, 0.5, 0.4),
            (12, 0.5, 0.5),
            (10, 0.5, 0.3),
            (16, 0.5, 0.2),
            (14, 0.5, 0.5),
            (20, 0.5, 0.6),
            (18, 0.5, 0.3),
        ],
    )
}

fn open_left() -> String {
    hand(
        "Left",
        0.8,
        &[
            (4, 0.3, 0.5),
            (2, 0.5, 0.5),
            (8, 0.5, 0.1),
            (6, 0.5, 0.4),
            (12, 0.5, 0.1),
            (10, 0.5, 0.4),
            (16, 0.5, 0.1),
            (14, 0.5, 0.4),
            (20, 0.5, 0.1),
            (18, 0.5, 0.4),
        ],
    )
}

#[test]
fn replayed_frames_produce_readouts_in_order() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}", frame(&[three_fingers_right()])).unwrap();
    writeln!(file, "{}", frame(&[three_fingers_right(), open_left()])).unwrap();
    writeln!(file, "this line is not json").unwrap();
    writeln!(file, "{}", frame(&[])).unwrap();
    // Too few landmarks: skipped, the other hand still counts.
    writeln!(
        file,
        "{}",
        frame(&[
            r#"{"handedness":"Right","landmarks":[{"x":0.1,"y":0.1}]}"#.to_string(),
            open_left(),
        ])
    )
    .unwrap();
    file.flush().unwrap();

    let reader = std::io::BufReader::new(file.reopen().unwrap());
    let source = ReplaySource::new(reader, DetectorOptions::default(), FrameSize::DEFAULT);
    let (report_tx, report_rx) = bounded(1);
    let session = start_counting_session(source, report_tx).unwrap();

    let reports: Vec<_> = report_rx.iter().collect();
    session.join();

    let totals: Vec<u32> = reports.iter().map(|r| r.total).collect();
    assert_eq!(totals, vec![3, 8, 0, 5]);
    assert_eq!(reports[0].per_hand_text(), "Right hand: 3");
    assert_eq!(reports[1].per_hand_text(), "Right hand: 3\nLeft hand: 5");
    assert_eq!(reports[2].per_hand_text(), "");
    assert_eq!(reports[3].per_hand_text(), "Left hand: 5");
    assert_eq!(reports[3].skipped.len(), 1);
}

#[test]
fn low_confidence_and_extra_hands_are_dropped() {
    let input = format!(
        "{}\n",
        frame(&[
            hand("Right", 0.1, &[]),
            open_left(),
            three_fingers_right(),
            open_left(),
        ])
    );
    let source = ReplaySource::new(
        std::io::Cursor::new(input.into_bytes()),
        DetectorOptions::default(),
        FrameSize::DEFAULT,
    );
    let (report_tx, report_rx) = bounded(1);
    let mut controller = SessionController::new();
    assert!(controller.start(source, report_tx).unwrap());

    let report = report_rx.recv_timeout(TIMEOUT).unwrap();
    controller.apply(&report);
    assert_eq!(controller.readout().total, "Total: 8");
    assert_eq!(controller.readout().per_hand, "Left hand: 5\nRight hand: 3");

    assert!(controller.stop());
    assert_eq!(controller.readout().total, "Total: 0");
}

#[test]
fn non_utf8_line_does_not_end_the_session() {
    let mut input = format!("{}\n", frame(&[open_left()])).into_bytes();
    input.extend_from_slice(b"\xff\xfe garbage\n");
    input.extend_from_slice(format!("{}\n", frame(&[three_fingers_right()])).as_bytes());

    let source = ReplaySource::new(
        std::io::Cursor::new(input),
        DetectorOptions::default(),
        FrameSize::DEFAULT,
    );
    let (report_tx, report_rx) = bounded(1);
    let session = start_counting_session(source, report_tx).unwrap();

    let totals: Vec<u32> = report_rx.iter().map(|r| r.total).collect();
    session.join();
    assert_eq!(totals, vec![5, 3]);
}
