//! Matrix decode against a scripted expander bus.
//!
//! Covers the protocol-level contract: idle short-circuit, unrecognized
//! patterns, transport failures, the missing column pass on 8×1, and the
//! table round-trip for every key of every geometry.

use keypad::{KeyCode, MatrixGeometry, MatrixScanner};
use platform::mocks::MockBus;

const ADDR: u8 = 0x20;

fn scanner(geometry: MatrixGeometry) -> MatrixScanner {
    MatrixScanner::new(ADDR, geometry)
}

#[tokio::test]
async fn idle_rows_decode_to_nokey_without_a_column_probe() {
    for geometry in [
        MatrixGeometry::FourByFour,
        MatrixGeometry::FiveByThree,
        MatrixGeometry::SixByTwo,
        MatrixGeometry::EightByOne,
    ] {
        let mut bus = MockBus::new();
        // Script only the row probe: a column probe would trip the mock.
        bus.on_probe(geometry.row_probe(), geometry.row_probe());

        assert_eq!(scanner(geometry).decode(&mut bus).await, KeyCode::NoKey);
        assert!(bus.done(), "{geometry:?} issued an extra transaction");
    }
}

#[tokio::test]
async fn every_key_round_trips_through_its_own_tables() {
    for geometry in [
        MatrixGeometry::FourByFour,
        MatrixGeometry::FiveByThree,
        MatrixGeometry::SixByTwo,
        MatrixGeometry::EightByOne,
    ] {
        let rows = geometry.row_count();
        let cols = match geometry {
            MatrixGeometry::FourByFour => 4,
            MatrixGeometry::FiveByThree => 3,
            MatrixGeometry::SixByTwo => 2,
            MatrixGeometry::EightByOne => 1,
        };
        for col in 0..cols {
            for row in 0..rows {
                let mut bus = MockBus::new();
                bus.on_probe(
                    geometry.row_probe(),
                    geometry.row_reading(row).expect("row in range"),
                );
                if let Some(col_probe) = geometry.col_probe() {
                    bus.on_probe(col_probe, geometry.col_reading(col).expect("col in range"));
                }

                let expected = row + rows * col;
                assert_eq!(
                    scanner(geometry).decode(&mut bus).await,
                    KeyCode::Key(expected),
                    "{geometry:?} row {row} col {col}"
                );
                assert!(bus.done());
            }
        }
    }
}

#[tokio::test]
async fn unrecognized_row_pattern_is_fail_and_skips_columns() {
    let mut bus = MockBus::new();
    // Two rows low at once on a 4×4.
    bus.on_probe(0xF0, 0xC0);

    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::Fail
    );
    assert!(bus.done(), "column probe must not run after a row Fail");
}

#[tokio::test]
async fn unrecognized_column_pattern_is_fail() {
    let mut bus = MockBus::new();
    bus.on_probe(0xF0, 0xE0); // row 0
    bus.on_probe(0x0F, 0x0C); // two columns low at once

    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::Fail
    );
}

#[tokio::test]
async fn release_between_probes_is_nokey() {
    let mut bus = MockBus::new();
    bus.on_probe(0xF0, 0xE0); // row 0 held
    bus.on_probe(0x0F, 0x0F); // gone by the column pass

    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::NoKey
    );
}

#[tokio::test]
async fn transport_errors_decode_to_fail() {
    // NACK on the row-probe write.
    let mut bus = MockBus::new();
    bus.nack_write(0xF0);
    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::Fail
    );

    // NACK on the row-probe read-back.
    let mut bus = MockBus::new();
    bus.nack_read(0xF0);
    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::Fail
    );

    // Row pass succeeds, column pass dies.
    let mut bus = MockBus::new();
    bus.on_probe(0xF0, 0xE0);
    bus.nack_write(0x0F);
    assert_eq!(
        scanner(MatrixGeometry::FourByFour).decode(&mut bus).await,
        KeyCode::Fail
    );
}

#[tokio::test]
async fn eight_by_one_never_probes_columns() {
    let mut bus = MockBus::new();
    bus.on_probe(0xFF, 0xDF); // row 5

    assert_eq!(
        scanner(MatrixGeometry::EightByOne).decode(&mut bus).await,
        KeyCode::Key(5)
    );
    assert!(bus.done());
}
