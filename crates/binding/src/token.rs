//! Wrapped ether (WETH9) contract bindings.

use alloy_sol_types::sol;

sol! {
    /// WETH9 token interface
    #[derive(Debug)]
    interface IWETH9 {
        /// Emitted when `guy` is approved to spend `wad` of `src`'s balance
        event Approval(address indexed src, address indexed guy, uint256 wad);

        /// Emitted when `wad` is moved from `src` to `dst`
        event Transfer(address indexed src, address indexed dst, uint256 wad);

        /// Emitted when ether is wrapped
        event Deposit(address indexed dst, uint256 wad);

        /// Emitted when ether is unwrapped
        event Withdrawal(address indexed src, uint256 wad);

        function name() external view returns (string memory);

        function symbol() external view returns (string memory);

        function decimals() external view returns (uint8);

        function totalSupply() external view returns (uint256);

        /// Get token balance of an owner
        function balanceOf(address owner) external view returns (uint256);

        function allowance(address owner, address spender) external view returns (uint256);

        function approve(address guy, uint256 wad) external returns (bool);

        function transfer(address dst, uint256 wad) external returns (bool);

        function transferFrom(address src, address dst, uint256 wad) external returns (bool);

        /// Wrap the attached ether
        function deposit() external payable;

        /// Unwrap `wad` back to ether
        function withdraw(uint256 wad) external;
    }
}
