//! Examination-related types.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::crypto::Passphrase;

/// Decrypted patient record read from an Examination contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInfo {
    /// Patient wallet address.
    pub address: Address,
    /// Decrypted patient data.
    pub data: String,
}

/// Metadata of the ERC-20 token used for payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenData {
    /// Token name (e.g., "Hospital Token").
    pub name: String,
    /// Token symbol (e.g., "HSP").
    pub symbol: String,
    /// Number of decimals.
    pub decimals: u8,
}

/// Payment state of one Examination contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatus {
    /// Tokens deposited by the patient.
    pub deposit: U256,
    /// Registered medical cost in token units.
    pub medical_cost: U256,
    /// Outstanding amount still owed to the hospital.
    pub unpaid_cost: U256,
    /// Whether the patient has countersigned the cost.
    pub signed: bool,
    /// Amount already paid out to the hospital.
    pub paid_to_hospital: U256,
    /// Amount already refunded to the patient.
    pub paid_to_patient: U256,
}

/// One decrypted medical note with its on-chain timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalNote {
    /// Decrypted note text.
    pub note: String,
    /// Block timestamp recorded when the note was appended.
    pub timestamp: U256,
}

/// One entry of the Management registry's examination list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExaminationInfo {
    /// Address of the deployed Examination contract.
    pub address: Address,
    /// Block timestamp at which the examination started.
    pub start: U256,
}

/// Capability proving the patient passphrase has been recovered.
///
/// Produced only by `ExaminationClient::get_patient_info`; note
/// encryption/decryption and event subscription require it, so those
/// operations cannot be reached before the patient record is loaded.
#[derive(Clone)]
pub struct PatientKey(Passphrase);

impl PatientKey {
    pub(crate) fn new(passphrase: Passphrase) -> Self {
        Self(passphrase)
    }

    pub(crate) fn passphrase(&self) -> &Passphrase {
        &self.0
    }
}

impl std::fmt::Debug for PatientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PatientKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_patient_info_serialization() {
        let info = PatientInfo {
            address: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            data: "blood type O".to_string(),
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"data\":\"blood type O\""));

        let parsed: PatientInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.address, info.address);
        assert_eq!(parsed.data, info.data);
    }

    #[test]
    fn test_payment_status_serialization() {
        let status = PaymentStatus {
            deposit: U256::from(1_000_000u64),
            medical_cost: U256::from(750_000u64),
            unpaid_cost: U256::ZERO,
            signed: true,
            paid_to_hospital: U256::from(750_000u64),
            paid_to_patient: U256::from(250_000u64),
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"signed\":true"));

        let parsed: PaymentStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.medical_cost, status.medical_cost);
    }

    #[test]
    fn test_patient_key_debug_redacted() {
        let key = PatientKey::new(Passphrase::new("patient secret"));
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("patient secret"));
    }
}
