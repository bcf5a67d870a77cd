//! Decoded contract events.

use alloy::primitives::{Address, U256};
use serde::Serialize;

/// A decoded event forwarded to subscription callbacks.
///
/// One variant per ABI event across the Management contract, the
/// Examination contract and the payment token. `AddMedicalNote` carries the
/// note already decrypted.
#[derive(Debug, Clone, Serialize)]
pub enum ExaminationEvent {
    /// A new Examination contract was deployed through the registry.
    StartExamination {
        contract_address: Address,
        hospital_address: Address,
        patient_address: Address,
        token_address: Address,
        random: u32,
    },
    /// The hospital registered a medical cost.
    SetMedicalCost { medical_cost: U256 },
    /// The patient's countersignature was recorded.
    SignMedicalCost { signed: bool },
    /// Escrowed tokens were paid out.
    WithDraw { unpaid_cost: U256, paid_to_hospital: U256, paid_to_patient: U256 },
    /// A medical note was appended (note field decrypted before delivery).
    AddMedicalNote { timestamp: U256, note: String },
    /// The contract reported a failed internal operation.
    EventFailed { event_name: String, message: String },
    /// ERC-20 transfer addressed to the Examination contract.
    Transfer { from: Address, to: Address, value: U256 },
}

impl ExaminationEvent {
    /// The ABI name of the underlying event.
    pub fn name(&self) -> &'static str {
        match self {
            ExaminationEvent::StartExamination { .. } => "StartExamination",
            ExaminationEvent::SetMedicalCost { .. } => "SetMedicalCost",
            ExaminationEvent::SignMedicalCost { .. } => "SignMedicalCost",
            ExaminationEvent::WithDraw { .. } => "WithDraw",
            ExaminationEvent::AddMedicalNote { .. } => "AddMedicalNote",
            ExaminationEvent::EventFailed { .. } => "EventFailed",
            ExaminationEvent::Transfer { .. } => "Transfer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = ExaminationEvent::SetMedicalCost { medical_cost: U256::from(1u64) };
        assert_eq!(event.name(), "SetMedicalCost");

        let event = ExaminationEvent::Transfer {
            from: Address::ZERO,
            to: Address::ZERO,
            value: U256::ZERO,
        };
        assert_eq!(event.name(), "Transfer");
    }

    #[test]
    fn test_event_serialization() {
        let event = ExaminationEvent::AddMedicalNote {
            timestamp: U256::from(1_700_000_000u64),
            note: "checkup complete".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("AddMedicalNote"));
        assert!(json.contains("checkup complete"));
    }
}
