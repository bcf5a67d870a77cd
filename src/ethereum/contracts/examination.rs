//! Examination contract bindings.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IExamination {
        struct MedicalNote {
            string note;
            uint256 timestamp;
        }

        event AddMedicalNote(uint256 timestamp, string note);
        event EventFailed(string eventName, string message);
        event SetMedicalCost(uint256 medicalCost);
        event SignMedicalCost(bool signed);
        event WithDraw(uint256 unpaidCost, uint256 paidToHospital, uint256 paidToPatient);

        function addMedicalNote(string calldata note) external;
        function getMedicalNotes() external view returns (MedicalNote[] memory);
        function getPatientAddress() external view returns (address);
        function getPatientInfo()
            external
            view
            returns (address patientAddress, string memory patientData, string memory patientPassPhrase);
        function getPaymentStatus()
            external
            view
            returns (
                uint256 deposit,
                uint256 medicalCost,
                uint256 unpaidCost,
                bool signed,
                uint256 paidToHospital,
                uint256 paidToPatient
            );
        function getTokenData()
            external
            view
            returns (string memory name, string memory symbol, uint8 decimals);
        function getUsedEther() external view returns (uint256);
        function setMedicalCost(uint256 medicalCost) external;
        function signMedicalCost(bytes calldata signature) external;
        function withDraw() external;
    }
}
