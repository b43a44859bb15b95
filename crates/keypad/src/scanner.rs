//! Two-probe matrix scan over the expander bus.

use platform::ExpanderBus;

use crate::geometry::MatrixGeometry;
use crate::KeyCode;

/// Decodes raw expander readings into a [`KeyCode`].
///
/// One `decode` issues at most two bus round-trips: the row probe, and —
/// only when a row is actually pulled low — the column probe. The idle
/// matrix therefore costs a single transaction per poll.
///
/// Transport errors are absorbed into [`KeyCode::Fail`]; nothing is retried
/// within a cycle. The next poll re-probes fresh, so a stalled bus shows up
/// as a run of `Fail` sentinels rather than a crash.
pub struct MatrixScanner {
    address: u8,
    geometry: MatrixGeometry,
}

impl MatrixScanner {
    /// Scanner for the expander at `address` with the given layout.
    pub fn new(address: u8, geometry: MatrixGeometry) -> Self {
        Self { address, geometry }
    }

    /// Active layout.
    pub fn geometry(&self) -> MatrixGeometry {
        self.geometry
    }

    /// Expander I2C address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Run one scan: row probe, optional column probe, combine.
    pub async fn decode<B: ExpanderBus>(&self, bus: &mut B) -> KeyCode {
        let geometry = self.geometry;

        let row_probe = geometry.row_probe();
        let Some(rows) = self.read_masked(bus, row_probe).await else {
            return KeyCode::Fail;
        };
        if rows == row_probe {
            // All rows high: idle. Skip the column transaction entirely.
            return KeyCode::NoKey;
        }
        let Some(row) = geometry.row_index(rows) else {
            return KeyCode::Fail;
        };

        let Some(col_probe) = geometry.col_probe() else {
            // 8×1: the row alone identifies the key.
            return KeyCode::Key(row);
        };
        let Some(cols) = self.read_masked(bus, col_probe).await else {
            return KeyCode::Fail;
        };
        if cols == col_probe {
            // Key released between the two probes.
            return KeyCode::NoKey;
        }
        let Some(col) = geometry.col_index(cols) else {
            return KeyCode::Fail;
        };

        // key = row + row_count * col
        match col
            .checked_mul(geometry.row_count())
            .and_then(|scaled| scaled.checked_add(row))
        {
            Some(key) => KeyCode::Key(key),
            None => KeyCode::Fail,
        }
    }

    /// Drive `mask`, read the port back. `None` on any transport error.
    async fn read_masked<B: ExpanderBus>(&self, bus: &mut B, mask: u8) -> Option<u8> {
        if bus.write_mask(self.address, mask).await.is_err() {
            return None;
        }
        bus.read_port(self.address).await.ok()
    }
}
