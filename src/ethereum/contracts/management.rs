//! Management registry contract bindings.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IManagement {
        struct ExaminationInfo {
            address examinationContract;
            uint256 start;
        }

        event StartExamination(
            address contractAddress,
            address indexed hospitalAddress,
            address indexed patientAddress,
            address tokenAddress,
            uint32 indexed random
        );

        function startExamination(
            string calldata patientData,
            bytes calldata signature,
            string calldata patientPassPhrase,
            address tokenAddress,
            uint32 random
        ) external;

        function getExaminationList() external view returns (ExaminationInfo[] memory);
    }
}
