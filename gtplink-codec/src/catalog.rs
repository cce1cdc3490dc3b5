//! Message and IE catalog
//!
//! A static, read-only registry of GTP message and Information Element
//! descriptors keyed by the 3GPP identifiers. Three views are provided:
//! (version, type id) -> message descriptor, name -> message descriptor,
//! and (version, IE type id) -> IE descriptor.
//!
//! The tables are data, not behavior: a descriptor carries the short name,
//! a description, the mandatory IE list, the expected response type (if
//! the message triggers one) and, for GTPv1 TV-format IEs, the fixed value
//! size the wire format omits.
//!
//! Message lookups by name fail hard with [`CodecError::UnknownMessage`];
//! IE lookups that miss fall back to a sentinel descriptor that assumes
//! the self-describing TLV/TLIV encoding.

use crate::error::CodecError;
use crate::GtpVersion;

/// GTPv1 message types (TS 29.060 §7.1)
pub mod v1_msg {
    /// Echo Request
    pub const ECHO_REQUEST: u8 = 1;
    /// Echo Response
    pub const ECHO_RESPONSE: u8 = 2;
    /// Create PDP Context Request
    pub const CREATE_PDP_CONTEXT_REQUEST: u8 = 16;
    /// Create PDP Context Response
    pub const CREATE_PDP_CONTEXT_RESPONSE: u8 = 17;
    /// Update PDP Context Request
    pub const UPDATE_PDP_CONTEXT_REQUEST: u8 = 18;
    /// Update PDP Context Response
    pub const UPDATE_PDP_CONTEXT_RESPONSE: u8 = 19;
    /// Delete PDP Context Request
    pub const DELETE_PDP_CONTEXT_REQUEST: u8 = 20;
    /// Delete PDP Context Response
    pub const DELETE_PDP_CONTEXT_RESPONSE: u8 = 21;
    /// Error Indication
    pub const ERROR_INDICATION: u8 = 26;
    /// End Marker
    pub const END_MARKER: u8 = 254;
    /// G-PDU (user data, payload is an opaque tunnelled packet)
    pub const G_PDU: u8 = 255;
}

/// GTPv2 message types (TS 29.274 §6.1)
pub mod v2_msg {
    /// Echo Request
    pub const ECHO_REQUEST: u8 = 1;
    /// Echo Response
    pub const ECHO_RESPONSE: u8 = 2;
    /// Version Not Supported Indication
    pub const VERSION_NOT_SUPPORTED: u8 = 3;
    /// Create Session Request
    pub const CREATE_SESSION_REQUEST: u8 = 32;
    /// Create Session Response
    pub const CREATE_SESSION_RESPONSE: u8 = 33;
    /// Modify Bearer Request
    pub const MODIFY_BEARER_REQUEST: u8 = 34;
    /// Modify Bearer Response
    pub const MODIFY_BEARER_RESPONSE: u8 = 35;
    /// Delete Session Request
    pub const DELETE_SESSION_REQUEST: u8 = 36;
    /// Delete Session Response
    pub const DELETE_SESSION_RESPONSE: u8 = 37;
    /// Create Bearer Request
    pub const CREATE_BEARER_REQUEST: u8 = 95;
    /// Create Bearer Response
    pub const CREATE_BEARER_RESPONSE: u8 = 96;
    /// Delete Bearer Request
    pub const DELETE_BEARER_REQUEST: u8 = 99;
    /// Delete Bearer Response
    pub const DELETE_BEARER_RESPONSE: u8 = 100;
    /// Release Access Bearers Request
    pub const RELEASE_ACCESS_BEARERS_REQUEST: u8 = 170;
    /// Release Access Bearers Response
    pub const RELEASE_ACCESS_BEARERS_RESPONSE: u8 = 171;
    /// Downlink Data Notification
    pub const DOWNLINK_DATA_NOTIFICATION: u8 = 176;
    /// Downlink Data Notification Acknowledge
    pub const DOWNLINK_DATA_NOTIFICATION_ACK: u8 = 177;
}

/// GTPv1 IE types (TS 29.060 §7.7)
pub mod v1_ie {
    /// Cause
    pub const CAUSE: u8 = 1;
    /// IMSI
    pub const IMSI: u8 = 2;
    /// Recovery (restart counter)
    pub const RECOVERY: u8 = 14;
    /// Tunnel Endpoint Identifier Data I
    pub const TEID_DATA_I: u8 = 16;
    /// Tunnel Endpoint Identifier Control Plane
    pub const TEID_CONTROL_PLANE: u8 = 17;
    /// NSAPI
    pub const NSAPI: u8 = 20;
    /// Charging ID
    pub const CHARGING_ID: u8 = 127;
    /// End User Address
    pub const END_USER_ADDRESS: u8 = 128;
    /// Access Point Name
    pub const ACCESS_POINT_NAME: u8 = 131;
    /// GSN Address
    pub const GSN_ADDRESS: u8 = 133;
}

/// GTPv2 IE types (TS 29.274 §8.1)
pub mod v2_ie {
    /// International Mobile Subscriber Identity
    pub const IMSI: u8 = 1;
    /// Cause
    pub const CAUSE: u8 = 2;
    /// Recovery (restart counter)
    pub const RECOVERY: u8 = 3;
    /// Access Point Name
    pub const APN: u8 = 71;
    /// Aggregate Maximum Bit Rate
    pub const AMBR: u8 = 72;
    /// EPS Bearer ID
    pub const EBI: u8 = 73;
    /// IP Address
    pub const IP_ADDRESS: u8 = 74;
    /// Mobile Equipment Identity
    pub const MEI: u8 = 75;
    /// MSISDN
    pub const MSISDN: u8 = 76;
    /// Indication
    pub const INDICATION: u8 = 77;
    /// Protocol Configuration Options
    pub const PCO: u8 = 78;
    /// PDN Address Allocation
    pub const PAA: u8 = 79;
    /// Bearer Level Quality of Service
    pub const BEARER_QOS: u8 = 80;
    /// Flow Quality of Service
    pub const FLOW_QOS: u8 = 81;
    /// RAT Type
    pub const RAT_TYPE: u8 = 82;
    /// Serving Network
    pub const SERVING_NETWORK: u8 = 83;
    /// EPS Bearer Level Traffic Flow Template
    pub const BEARER_TFT: u8 = 84;
    /// Traffic Aggregation Description
    pub const TAD: u8 = 85;
    /// User Location Information
    pub const ULI: u8 = 86;
    /// Fully Qualified Tunnel Endpoint Identifier
    pub const FTEID: u8 = 87;
    /// TMSI
    pub const TMSI: u8 = 88;
    /// Delay Value
    pub const DELAY_VALUE: u8 = 92;
    /// Bearer Context (grouped)
    pub const BEARER_CONTEXT: u8 = 93;
    /// Charging ID
    pub const CHARGING_ID: u8 = 94;
    /// PDN Type
    pub const PDN_TYPE: u8 = 99;
    /// Procedure Transaction ID
    pub const PTI: u8 = 100;
    /// PDN Connection (grouped)
    pub const PDN_CONNECTION: u8 = 109;
    /// P-TMSI
    pub const PTMSI: u8 = 111;
    /// Port Number
    pub const PORT_NUMBER: u8 = 126;
    /// APN Restriction
    pub const APN_RESTRICTION: u8 = 127;
    /// Selection Mode
    pub const SELECTION_MODE: u8 = 128;
    /// Fully Qualified PDN Connection Set Identifier
    pub const FQCSID: u8 = 132;
    /// Node Type
    pub const NODE_TYPE: u8 = 135;
    /// Fully Qualified Domain Name
    pub const FQDN: u8 = 136;
    /// Allocation/Retention Priority
    pub const ARP: u8 = 155;
    /// Throttling
    pub const THROTTLING: u8 = 154;
    /// EPC Timer
    pub const EPC_TIMER: u8 = 156;
    /// Overload Control Information (grouped)
    pub const OVERLOAD_CONTROL_INFORMATION: u8 = 180;
    /// Load Control Information (grouped)
    pub const LOAD_CONTROL_INFORMATION: u8 = 181;
    /// Metric
    pub const METRIC: u8 = 182;
    /// Sequence Number
    pub const SEQUENCE_NUMBER: u8 = 183;
    /// Remote UE Context (grouped)
    pub const REMOTE_UE_CONTEXT: u8 = 191;
    /// UP Function Selection Indication Flags
    pub const UP_FUNCTION_SELECTION_INDICATION_FLAGS: u8 = 202;
    /// Private Extension
    pub const PRIVATE_EXTENSION: u8 = 255;
}

/// IE wire encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IeFormat {
    /// Type-Value: fixed-size value, size known from the catalog (v1,
    /// type high bit clear)
    Tv,
    /// Type-Length-Value (v1, type high bit set) or Type-Length-
    /// Instance-Value (v2)
    Tlv,
}

/// Descriptor for an Information Element type.
#[derive(Debug, Clone, Copy)]
pub struct IeDescriptor {
    /// 3GPP IE type id
    pub id: u8,
    /// Protocol version the id belongs to
    pub version: GtpVersion,
    /// Short name
    pub name: &'static str,
    /// Wire encoding
    pub format: IeFormat,
    /// Fixed value size for TV-format IEs, 0 otherwise
    pub tv_size: u16,
}

/// Descriptor for a GTP message type.
///
/// `response` holds the type id (same version) of the triggered message
/// when the message expects one; it is resolved back into a descriptor
/// with [`MessageDescriptor::response`]. `response_teid_zero` marks
/// messages whose triggered reply carries TEID 0 regardless of the
/// request TEID (Echo).
#[derive(Debug)]
pub struct MessageDescriptor {
    /// 3GPP message type id
    pub id: u8,
    /// Protocol version
    pub version: GtpVersion,
    /// Registry name, unique across versions
    pub name: &'static str,
    /// Free-text description
    pub description: &'static str,
    /// Mandatory IE type ids, in catalog order
    pub mandatory: &'static [u8],
    /// Type id of the expected triggered message, if any
    pub response: Option<u8>,
    /// The triggered reply is sent with TEID 0
    pub response_teid_zero: bool,
}

impl MessageDescriptor {
    /// Resolves the expected response descriptor, if the message has one.
    pub fn response(&self) -> Option<&'static MessageDescriptor> {
        message(self.version, self.response?)
    }

    /// True when a triggered reply is expected and the sender must hold
    /// the message for retransmission.
    pub fn expects_reply(&self) -> bool {
        self.response.is_some()
    }
}

static V1_MESSAGES: &[MessageDescriptor] = &[
    MessageDescriptor {
        id: v1_msg::ECHO_REQUEST,
        version: GtpVersion::V1,
        name: "GTPv1 Echo Request",
        description: "Path alive check",
        mandatory: &[],
        response: Some(v1_msg::ECHO_RESPONSE),
        response_teid_zero: true,
    },
    MessageDescriptor {
        id: v1_msg::ECHO_RESPONSE,
        version: GtpVersion::V1,
        name: "GTPv1 Echo Response",
        description: "Path alive reply",
        mandatory: &[v1_ie::RECOVERY],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::CREATE_PDP_CONTEXT_REQUEST,
        version: GtpVersion::V1,
        name: "Create PDP Context Request",
        description: "PDP context activation",
        mandatory: &[v1_ie::TEID_DATA_I, v1_ie::NSAPI],
        response: Some(v1_msg::CREATE_PDP_CONTEXT_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::CREATE_PDP_CONTEXT_RESPONSE,
        version: GtpVersion::V1,
        name: "Create PDP Context Response",
        description: "PDP context activation reply",
        mandatory: &[v1_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::UPDATE_PDP_CONTEXT_REQUEST,
        version: GtpVersion::V1,
        name: "Update PDP Context Request",
        description: "PDP context modification",
        mandatory: &[],
        response: Some(v1_msg::UPDATE_PDP_CONTEXT_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::UPDATE_PDP_CONTEXT_RESPONSE,
        version: GtpVersion::V1,
        name: "Update PDP Context Response",
        description: "PDP context modification reply",
        mandatory: &[v1_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::DELETE_PDP_CONTEXT_REQUEST,
        version: GtpVersion::V1,
        name: "Delete PDP Context Request",
        description: "PDP context deactivation",
        mandatory: &[],
        response: Some(v1_msg::DELETE_PDP_CONTEXT_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::DELETE_PDP_CONTEXT_RESPONSE,
        version: GtpVersion::V1,
        name: "Delete PDP Context Response",
        description: "PDP context deactivation reply",
        mandatory: &[v1_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::ERROR_INDICATION,
        version: GtpVersion::V1,
        name: "Error Indication",
        description: "No active PDP context for a received T-PDU",
        mandatory: &[v1_ie::TEID_DATA_I, v1_ie::GSN_ADDRESS],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::END_MARKER,
        version: GtpVersion::V1,
        name: "End Marker",
        description: "Last tunnelled packet on the old path",
        mandatory: &[],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v1_msg::G_PDU,
        version: GtpVersion::V1,
        name: "G-PDU",
        description: "Tunnelled user packet",
        mandatory: &[],
        response: None,
        response_teid_zero: false,
    },
];

static V2_MESSAGES: &[MessageDescriptor] = &[
    MessageDescriptor {
        id: v2_msg::ECHO_REQUEST,
        version: GtpVersion::V2,
        name: "Echo Request",
        description: "Path alive check",
        mandatory: &[],
        response: Some(v2_msg::ECHO_RESPONSE),
        response_teid_zero: true,
    },
    MessageDescriptor {
        id: v2_msg::ECHO_RESPONSE,
        version: GtpVersion::V2,
        name: "Echo Response",
        description: "Path alive reply",
        mandatory: &[v2_ie::RECOVERY],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::CREATE_SESSION_REQUEST,
        version: GtpVersion::V2,
        name: "Create Session Request",
        description: "Session establishment towards SGW/PGW",
        mandatory: &[v2_ie::RAT_TYPE],
        response: Some(v2_msg::CREATE_SESSION_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::CREATE_SESSION_RESPONSE,
        version: GtpVersion::V2,
        name: "Create Session Response",
        description: "Session establishment reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::MODIFY_BEARER_REQUEST,
        version: GtpVersion::V2,
        name: "Modify Bearer Request",
        description: "Bearer modification",
        mandatory: &[],
        response: Some(v2_msg::MODIFY_BEARER_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::MODIFY_BEARER_RESPONSE,
        version: GtpVersion::V2,
        name: "Modify Bearer Response",
        description: "Bearer modification reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DELETE_SESSION_REQUEST,
        version: GtpVersion::V2,
        name: "Delete Session Request",
        description: "Session teardown",
        mandatory: &[],
        response: Some(v2_msg::DELETE_SESSION_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DELETE_SESSION_RESPONSE,
        version: GtpVersion::V2,
        name: "Delete Session Response",
        description: "Session teardown reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::CREATE_BEARER_REQUEST,
        version: GtpVersion::V2,
        name: "Create Bearer Request",
        description: "Dedicated bearer establishment",
        mandatory: &[v2_ie::EBI, v2_ie::BEARER_CONTEXT],
        response: Some(v2_msg::CREATE_BEARER_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::CREATE_BEARER_RESPONSE,
        version: GtpVersion::V2,
        name: "Create Bearer Response",
        description: "Dedicated bearer establishment reply",
        mandatory: &[v2_ie::CAUSE, v2_ie::BEARER_CONTEXT],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DELETE_BEARER_REQUEST,
        version: GtpVersion::V2,
        name: "Delete Bearer Request",
        description: "Dedicated bearer teardown",
        mandatory: &[],
        response: Some(v2_msg::DELETE_BEARER_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DELETE_BEARER_RESPONSE,
        version: GtpVersion::V2,
        name: "Delete Bearer Response",
        description: "Dedicated bearer teardown reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::RELEASE_ACCESS_BEARERS_REQUEST,
        version: GtpVersion::V2,
        name: "Release Access Bearers Request",
        description: "S1 release",
        mandatory: &[],
        response: Some(v2_msg::RELEASE_ACCESS_BEARERS_RESPONSE),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::RELEASE_ACCESS_BEARERS_RESPONSE,
        version: GtpVersion::V2,
        name: "Release Access Bearers Response",
        description: "S1 release reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DOWNLINK_DATA_NOTIFICATION,
        version: GtpVersion::V2,
        name: "Downlink Data Notification",
        description: "Downlink data pending for an idle UE",
        mandatory: &[],
        response: Some(v2_msg::DOWNLINK_DATA_NOTIFICATION_ACK),
        response_teid_zero: false,
    },
    MessageDescriptor {
        id: v2_msg::DOWNLINK_DATA_NOTIFICATION_ACK,
        version: GtpVersion::V2,
        name: "Downlink Data Notification Acknowledge",
        description: "Downlink data notification reply",
        mandatory: &[v2_ie::CAUSE],
        response: None,
        response_teid_zero: false,
    },
];

// GTPv1 TV-format IEs and their fixed sizes (TS 29.060 table 37). Types
// with the high bit set are self-describing TLV and need no size here;
// the ones registered below with tv_size 0 are named TLV entries.
static V1_IES: &[IeDescriptor] = &[
    ie_v1("Cause", v1_ie::CAUSE, 1),
    ie_v1("IMSI", v1_ie::IMSI, 8),
    ie_v1("Routeing Area Identity", 3, 6),
    ie_v1("TLLI", 4, 4),
    ie_v1("P-TMSI", 5, 4),
    ie_v1("Reordering Required", 8, 1),
    ie_v1("Authentication Triplet", 9, 28),
    ie_v1("MAP Cause", 11, 1),
    ie_v1("P-TMSI Signature", 12, 3),
    ie_v1("MS Validated", 13, 1),
    ie_v1("Recovery", v1_ie::RECOVERY, 1),
    ie_v1("Selection Mode", 15, 1),
    ie_v1("TEID Data I", v1_ie::TEID_DATA_I, 4),
    ie_v1("TEID Control Plane", v1_ie::TEID_CONTROL_PLANE, 4),
    ie_v1("TEID Data II", 18, 5),
    ie_v1("Teardown Ind", 19, 1),
    ie_v1("NSAPI", v1_ie::NSAPI, 1),
    ie_v1("RANAP Cause", 21, 1),
    ie_v1("RAB Context", 22, 9),
    ie_v1("Radio Priority SMS", 23, 1),
    ie_v1("Radio Priority", 24, 1),
    ie_v1("Packet Flow Id", 25, 2),
    ie_v1("Charging Characteristics", 26, 2),
    ie_v1("Trace Reference", 27, 2),
    ie_v1("Trace Type", 28, 2),
    ie_v1("MS Not Reachable Reason", 29, 1),
    ie_v1("Charging ID", v1_ie::CHARGING_ID, 4),
    ie_v1_tlv("End User Address", v1_ie::END_USER_ADDRESS),
    ie_v1_tlv("Access Point Name", v1_ie::ACCESS_POINT_NAME),
    ie_v1_tlv("Protocol Configuration Options", 132),
    ie_v1_tlv("GSN Address", v1_ie::GSN_ADDRESS),
    ie_v1_tlv("MSISDN", 134),
    ie_v1_tlv("Quality of Service Profile", 135),
];

const fn ie_v1(name: &'static str, id: u8, tv_size: u16) -> IeDescriptor {
    IeDescriptor {
        id,
        version: GtpVersion::V1,
        name,
        format: IeFormat::Tv,
        tv_size,
    }
}

const fn ie_v1_tlv(name: &'static str, id: u8) -> IeDescriptor {
    IeDescriptor {
        id,
        version: GtpVersion::V1,
        name,
        format: IeFormat::Tlv,
        tv_size: 0,
    }
}

/// Looks up a message descriptor by version and type id.
pub fn message(version: GtpVersion, id: u8) -> Option<&'static MessageDescriptor> {
    let table = match version {
        GtpVersion::V0 | GtpVersion::V1 => V1_MESSAGES,
        GtpVersion::V2 => V2_MESSAGES,
    };
    table.iter().find(|m| m.id == id)
}

/// Looks up a message descriptor by registry name.
///
/// # Errors
///
/// Returns [`CodecError::UnknownMessage`] when the name is not registered.
pub fn message_by_name(name: &str) -> Result<&'static MessageDescriptor, CodecError> {
    V1_MESSAGES
        .iter()
        .chain(V2_MESSAGES.iter())
        .find(|m| m.name == name)
        .ok_or_else(|| CodecError::UnknownMessage {
            name: name.to_string(),
        })
}

/// Looks up a registered GTPv1 IE descriptor.
///
/// TV-format decoding needs this to recover the value size the wire
/// format omits; an unregistered TV type cannot be decoded.
pub fn v1_ie_descriptor(id: u8) -> Option<&'static IeDescriptor> {
    V1_IES.iter().find(|d| d.id == id)
}

/// Looks up an IE descriptor, falling back to a sentinel that assumes the
/// self-describing TLV/TLIV encoding for unregistered types.
pub fn ie_descriptor(version: GtpVersion, id: u8) -> IeDescriptor {
    match version {
        GtpVersion::V0 | GtpVersion::V1 => v1_ie_descriptor(id).copied().unwrap_or(IeDescriptor {
            id,
            version: GtpVersion::V1,
            name: "Unknown",
            format: IeFormat::Tlv,
            tv_size: 0,
        }),
        GtpVersion::V2 => IeDescriptor {
            id,
            version: GtpVersion::V2,
            name: v2_ie_name(id),
            format: IeFormat::Tlv,
            tv_size: 0,
        },
    }
}

/// True for GTPv2 IE types whose value is a concatenation of nested IEs.
pub fn is_grouped_v2_ie(id: u8) -> bool {
    matches!(
        id,
        v2_ie::BEARER_CONTEXT
            | v2_ie::PDN_CONNECTION
            | v2_ie::OVERLOAD_CONTROL_INFORMATION
            | v2_ie::LOAD_CONTROL_INFORMATION
            | v2_ie::REMOTE_UE_CONTEXT
    )
}

/// Returns the TS 29.274 §6.1 name for a GTPv2 message type.
pub fn v2_message_name(id: u8) -> &'static str {
    match id {
        1 => "Echo Request",
        2 => "Echo Response",
        3 => "Version Not Supported Indication",
        32 => "Create Session Request",
        33 => "Create Session Response",
        34 => "Modify Bearer Request",
        35 => "Modify Bearer Response",
        36 => "Delete Session Request",
        37 => "Delete Session Response",
        38 => "Change Notification Request",
        39 => "Change Notification Response",
        40 => "Remote UE Report Notification",
        41 => "Remote UE Report Acknowledge",
        64 => "Modify Bearer Command",
        65 => "Modify Bearer Failure Indication",
        66 => "Delete Bearer Command",
        67 => "Delete Bearer Failure Indication",
        68 => "Bearer Resource Command",
        69 => "Bearer Resource Failure Indication",
        70 => "Downlink Data Notification Failure Indication",
        71 => "Trace Session Activation",
        72 => "Trace Session Deactivation",
        73 => "Stop Paging Indication",
        95 => "Create Bearer Request",
        96 => "Create Bearer Response",
        97 => "Update Bearer Request",
        98 => "Update Bearer Response",
        99 => "Delete Bearer Request",
        100 => "Delete Bearer Response",
        101 => "Delete PDN Connection Set Request",
        102 => "Delete PDN Connection Set Response",
        103 => "PGW Downlink Triggering Notification",
        104 => "PGW Downlink Triggering Acknowledge",
        128 => "Identification Request",
        129 => "Identification Response",
        130 => "Context Request",
        131 => "Context Response",
        132 => "Context Acknowledge",
        133 => "Forward Relocation Request",
        134 => "Forward Relocation Response",
        135 => "Forward Relocation Complete Notification",
        136 => "Forward Relocation Complete Acknowledge",
        137 => "Forward Access Context Notification",
        138 => "Forward Access Context Acknowledge",
        139 => "Relocation Cancel Request",
        140 => "Relocation Cancel Response",
        141 => "Configuration Transfer Tunnel",
        149 => "Detach Notification",
        150 => "Detach Acknowledge",
        151 => "CS Paging Indication",
        152 => "RAN Information Relay",
        153 => "Alert MME Notification",
        154 => "Alert MME Acknowledge",
        155 => "UE Activity Notification",
        156 => "UE Activity Acknowledge",
        157 => "ISR Status Indication",
        160 => "Create Forwarding Tunnel Request",
        161 => "Create Forwarding Tunnel Response",
        162 => "Suspend Notification",
        163 => "Suspend Acknowledge",
        164 => "Resume Notification",
        165 => "Resume Acknowledge",
        166 => "Create Indirect Data Forwarding Tunnel Request",
        167 => "Create Indirect Data Forwarding Tunnel Response",
        168 => "Delete Indirect Data Forwarding Tunnel Request",
        169 => "Delete Indirect Data Forwarding Tunnel Response",
        170 => "Release Access Bearers Request",
        171 => "Release Access Bearers Response",
        176 => "Downlink Data Notification",
        177 => "Downlink Data Notification Acknowledge",
        179 => "PGW Restart Notification",
        180 => "PGW Restart Notification Acknowledge",
        200 => "Update PDN Connection Set Request",
        201 => "Update PDN Connection Set Response",
        211 => "Modify Access Bearers Request",
        212 => "Modify Access Bearers Response",
        231 => "MBMS Session Start Request",
        232 => "MBMS Session Start Response",
        233 => "MBMS Session Update Request",
        234 => "MBMS Session Update Response",
        235 => "MBMS Session Stop Request",
        236 => "MBMS Session Stop Response",
        _ => "Reserved",
    }
}

/// Returns the TS 29.274 §8.1 name for a GTPv2 IE type.
pub fn v2_ie_name(id: u8) -> &'static str {
    match id {
        1 => "International Mobile Subscriber Identity (IMSI)",
        2 => "Cause",
        3 => "Recovery (Restart Counter)",
        51 => "STN-SR",
        71 => "Access Point Name (APN)",
        72 => "Aggregate Maximum Bit Rate (AMBR)",
        73 => "EPS Bearer ID (EBI)",
        74 => "IP Address",
        75 => "Mobile Equipment Identity (MEI)",
        76 => "MSISDN",
        77 => "Indication",
        78 => "Protocol Configuration Options (PCO)",
        79 => "PDN Address Allocation (PAA)",
        80 => "Bearer Level Quality of Service (Bearer QoS)",
        81 => "Flow Quality of Service (Flow QoS)",
        82 => "RAT Type",
        83 => "Serving Network",
        84 => "EPS Bearer Level Traffic Flow Template (Bearer TFT)",
        85 => "Traffic Aggregation Description (TAD)",
        86 => "User Location Information (ULI)",
        87 => "Fully Qualified Tunnel Endpoint Identifier (F-TEID)",
        88 => "TMSI",
        89 => "Global CN-Id",
        90 => "S103 PDN Data Forwarding Info (S103PDF)",
        91 => "S1-U Data Forwarding Info (S1UDF)",
        92 => "Delay Value",
        93 => "Bearer Context",
        94 => "Charging ID",
        95 => "Charging Characteristics",
        96 => "Trace Information",
        97 => "Bearer Flags",
        99 => "PDN Type",
        100 => "Procedure Transaction ID",
        103 => "MM Context (GSM Key and Triplets)",
        104 => "MM Context (UMTS Key, Used Cipher and Quintuplets)",
        105 => "MM Context (GSM Key, Used Cipher and Quintuplets)",
        106 => "MM Context (UMTS Key and Quintuplets)",
        107 => "MM Context (EPS Security Context, Quadruplets and Quintuplets)",
        108 => "MM Context (UMTS Key, Quadruplets and Quintuplets)",
        109 => "PDN Connection",
        110 => "PDU Numbers",
        111 => "P-TMSI",
        112 => "P-TMSI Signature",
        113 => "Hop Counter",
        114 => "UE Time Zone",
        115 => "Trace Reference",
        116 => "Complete Request Message",
        117 => "GUTI",
        118 => "F-Container",
        119 => "F-Cause",
        120 => "PLMN ID",
        121 => "Target Identification",
        123 => "Packet Flow ID",
        124 => "RAB Context",
        125 => "Source RNC PDCP Context Info",
        126 => "Port Number",
        127 => "APN Restriction",
        128 => "Selection Mode",
        129 => "Source Identification",
        131 => "Change Reporting Action",
        132 => "Fully Qualified PDN Connection Set Identifier (FQ-CSID)",
        133 => "Channel needed",
        134 => "eMLPP Priority",
        135 => "Node Type",
        136 => "Fully Qualified Domain Name (FQDN)",
        137 => "Transaction Identifier (TI)",
        138 => "MBMS Session Duration",
        139 => "MBMS Service Area",
        140 => "MBMS Session Identifier",
        141 => "MBMS Flow Identifier",
        142 => "MBMS IP Multicast Distribution",
        143 => "MBMS Distribution Acknowledge",
        144 => "RFSP Index",
        145 => "User CSG Information (UCI)",
        146 => "CSG Information Reporting Action",
        147 => "CSG ID",
        148 => "CSG Membership Indication (CMI)",
        149 => "Service indicator",
        150 => "Detach Type",
        151 => "Local Distinguished Name (LDN)",
        152 => "Node Features",
        153 => "MBMS Time to Data Transfer",
        154 => "Throttling",
        155 => "Allocation/Retention Priority (ARP)",
        156 => "EPC Timer",
        157 => "Signalling Priority Indication",
        158 => "Temporary Mobile Group Identity (TMGI)",
        159 => "Additional MM context for SRVCC",
        160 => "Additional flags for SRVCC",
        162 => "MDT Configuration",
        163 => "Additional Protocol Configuration Options (APCO)",
        164 => "Absolute Time of MBMS Data Transfer",
        165 => "H(e)NB Information Reporting",
        166 => "IPv4 Configuration Parameters (IP4CP)",
        167 => "Change to Report Flags",
        168 => "Action Indication",
        169 => "TWAN Identifier",
        170 => "ULI Timestamp",
        171 => "MBMS Flags",
        172 => "RAN/NAS Cause",
        173 => "CN Operator Selection Entity",
        174 => "Trusted WLAN Mode Indication",
        175 => "Node Number",
        176 => "Node Identifier",
        177 => "Presence Reporting Area Action",
        178 => "Presence Reporting Area Information",
        179 => "TWAN Identifier Timestamp",
        180 => "Overload Control Information",
        181 => "Load Control Information",
        182 => "Metric",
        183 => "Sequence Number",
        184 => "APN and Relative Capacity",
        185 => "WLAN Offloadability Indication",
        186 => "Paging and Service Information",
        187 => "Integer Number",
        188 => "Millisecond Time Stamp",
        189 => "Monitoring Event Information",
        190 => "ECGI List",
        191 => "Remote UE Context",
        192 => "Remote User ID",
        193 => "Remote UE IP information",
        194 => "CIoT Optimizations Support Indication",
        195 => "SCEF PDN Connection",
        196 => "Header Compression Configuration",
        197 => "Extended Protocol Configuration Options (ePCO)",
        198 => "Serving PLMN Rate Control",
        199 => "Counter",
        200 => "Mapped UE Usage Type",
        201 => "Secondary RAT Usage Data Report",
        202 => "UP Function Selection Indication Flags",
        254 => "IE Extension",
        255 => "Private Extension",
        _ => "Reserved",
    }
}
