use alloc::string::String;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::FixedInt64;
use crate::OCTETS;

impl Serialize for FixedInt64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // exact 16-digit octet form, never the lossy decimal one
            serializer.collect_str(&format_args!("{self:x}"))
        } else {
            self.into_octets().serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for FixedInt64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(de::Error::custom)
        } else {
            <[u8; OCTETS]>::deserialize(deserializer).map(Self::from_octets)
        }
    }
}
