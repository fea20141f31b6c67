//! Poll contract ABI

use alloy_sol_types::sol;

sol! {
    /// Interface of the deployed poll contract
    #[sol(all_derives)]
    interface IPollContract {
        function createPoll(string title, string[] options) external;
        function vote(uint256 pollId, uint256 optionIndex) external;
        function endPoll(uint256 pollId) external;
        function getPoll(uint256 pollId) external view returns (string title, bool active, string[] optionNames, uint256[] optionVotes);
        function getAllPolls() external view returns (uint256[] pollIds, string[] titles);
        function getPollCreator(uint256 pollId) external view returns (address);
    }
}
