//! Proptest generators for property-based testing.

use proptest::prelude::*;

use cartrack_core::{KvEntry, TxTimestamp};

/// Generate a VIN-shaped chassis number.
pub fn chassis_number() -> impl Strategy<Value = String> {
    "[A-HJ-NPR-Z0-9]{17}".prop_map(String::from)
}

/// Generate a whitespace-only (possibly empty) string.
pub fn blank() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,8}".prop_map(String::from)
}

/// Generate a plausible certificate common name.
pub fn identity_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9.-]{0,31}".prop_map(String::from)
}

/// Generate a short free-text field value.
pub fn field_value() -> impl Strategy<Value = String> {
    "[ -~]{0,24}".prop_map(String::from)
}

/// Generate a transaction timestamp within chrono's calendar range.
pub fn tx_timestamp() -> impl Strategy<Value = TxTimestamp> {
    (-62_135_596_800i64..=253_402_300_799i64, 0i32..1_000_000_000)
        .prop_map(|(seconds, nanos)| TxTimestamp::new(seconds, nanos))
}

/// Generate a non-empty batch of entries with non-empty keys.
pub fn kv_batch(max_len: usize) -> impl Strategy<Value = Vec<KvEntry>> {
    prop::collection::vec(
        ("[a-z0-9:_-]{1,16}", field_value()).prop_map(|(k, v)| KvEntry::new(k, v)),
        1..=max_len,
    )
}

/// Client-supplied vehicle fields, including attribution fields the contract
/// must ignore.
#[derive(Debug, Clone)]
pub struct VehicleParams {
    pub chassis_number: String,
    pub claimed_manufacturer: String,
    pub claimed_status: String,
    pub year: String,
    pub model: String,
    pub color: String,
    pub owner: String,
}

impl VehicleParams {
    /// Render as a `createCarEntry` payload.
    pub fn to_payload(&self) -> String {
        serde_json::json!({
            "chasisNumber": self.chassis_number,
            "manufacturer": self.claimed_manufacturer,
            "updBy": self.claimed_manufacturer,
            "status": self.claimed_status,
            "makeYear": self.year,
            "model": self.model,
            "color": self.color,
            "owner": self.owner,
        })
        .to_string()
    }
}

impl Arbitrary for VehicleParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            chassis_number(),
            identity_name(),
            "[A-Z]{0,8}",
            "(19|20)[0-9]{2}",
            field_value(),
            field_value(),
            field_value(),
        )
            .prop_map(
                |(chassis_number, claimed_manufacturer, claimed_status, year, model, color, owner)| {
                    VehicleParams {
                        chassis_number,
                        claimed_manufacturer,
                        claimed_status,
                        year,
                        model,
                        color,
                        owner,
                    }
                },
            )
            .boxed()
    }
}
