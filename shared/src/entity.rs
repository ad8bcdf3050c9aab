use tether_serde::{ByteReader, ByteWriter, Serde, SerdeErr};

use crate::{ConnectionId, Tick};

/// Everything a Spawn carries about one connected player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub connection_id: ConnectionId,
    pub display_name: String,
    pub account_id: u64,
    /// Gameplay state, opaque to the registries
    pub payload: Vec<u8>,
}

impl EntityDescriptor {
    pub fn new(
        connection_id: ConnectionId,
        display_name: impl Into<String>,
        account_id: u64,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            connection_id,
            display_name: display_name.into(),
            account_id,
            payload,
        }
    }
}

impl Serde for EntityDescriptor {
    fn ser(&self, writer: &mut ByteWriter) {
        self.connection_id.ser(writer);
        self.display_name.ser(writer);
        self.account_id.ser(writer);
        self.payload.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let connection_id = ConnectionId::de(reader)?;
        let display_name = String::de(reader)?;
        let account_id = u64::de(reader)?;
        let payload = Vec::<u8>::de(reader)?;
        Ok(Self {
            connection_id,
            display_name,
            account_id,
            payload,
        })
    }

    fn byte_length(&self) -> usize {
        self.connection_id.byte_length()
            + self.display_name.byte_length()
            + self.account_id.byte_length()
            + self.payload.byte_length()
    }
}

/// Identity and lifecycle shared by the authoritative entity a host owns and
/// the mirror a peer keeps of it.
pub trait NetEntity {
    fn descriptor(&self) -> &EntityDescriptor;

    /// Tick at which this side created the entity
    fn spawned_at(&self) -> Tick;

    fn connection_id(&self) -> ConnectionId {
        self.descriptor().connection_id
    }

    fn display_name(&self) -> &str {
        &self.descriptor().display_name
    }

    fn account_id(&self) -> u64 {
        self.descriptor().account_id
    }

    fn payload(&self) -> &[u8] {
        &self.descriptor().payload
    }
}
