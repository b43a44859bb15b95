//! Property tests for the platform mocks.
//!
//! The keypad, dialer, and firmware tests all build on these mocks, so their
//! storage and scripting invariants get checked across generated inputs.

use proptest::prelude::*;

use platform::mocks::{MockBus, MockStorage};
use platform::{ExpanderBus as _, File as _, Storage as _};

fn block_on<F: core::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime")
        .block_on(future)
}

proptest! {
    /// Whatever `write_file` stores comes back byte-exact through `exists`,
    /// `contents`, and a full `open_file` + `read`.
    #[test]
    fn written_files_read_back_exactly(
        name in "[a-z0-9]{1,8}",
        data in proptest::collection::vec(any::<u8>(), 0..=256),
    ) {
        block_on(async {
            let mut store = MockStorage::new();
            let path = format!("/{name}.mp3");
            store.write_file(&path, &data).await.expect("write");

            prop_assert!(matches!(store.exists(&path).await, Ok(true)));
            prop_assert_eq!(store.contents(&path), Some(data.as_slice()));

            let mut file = store.open_file(&path).await.expect("open");
            prop_assert_eq!(file.size(), data.len() as u64);
            let mut buf = [0u8; 256];
            let n = file.read(&mut buf).await.expect("read");
            prop_assert_eq!(&buf[..n], data.as_slice());
            Ok(())
        })?;
    }

    /// Seeks clamp to the end of the file and reads resume from there.
    #[test]
    fn seek_then_read_returns_the_suffix(
        data in proptest::collection::vec(any::<u8>(), 0..=64),
        pos in 0u64..128,
    ) {
        block_on(async {
            let mut store = MockStorage::new();
            store.add_file("/clip.mp3", &data);
            let mut file = store.open_file("/clip.mp3").await.expect("open");

            let clamped = (pos as usize).min(data.len());
            prop_assert_eq!(file.seek(pos).await.expect("seek"), clamped as u64);

            let mut buf = [0u8; 64];
            let n = file.read(&mut buf).await.expect("read");
            prop_assert_eq!(&buf[..n], &data[clamped..]);
            Ok(())
        })?;
    }

    /// A scripted bus answers write/read pairs in FIFO order and reports
    /// done only once the whole script is consumed.
    #[test]
    fn scripted_replies_come_back_in_fifo_order(
        script in proptest::collection::vec((any::<u8>(), any::<u8>()), 0..=32),
    ) {
        block_on(async {
            let mut bus = MockBus::new();
            for (mask, value) in &script {
                bus.on_probe(*mask, *value);
            }
            for (step, (mask, value)) in script.iter().enumerate() {
                bus.write_mask(0x20, *mask).await.expect("scripted write");
                let got = bus.read_port(0x20).await.expect("scripted read");
                prop_assert_eq!(got, *value, "step {}", step);
            }
            prop_assert!(bus.done());
            Ok(())
        })?;
    }
}
