pub const PLAYER_ADDRS: [&str; 6] = ["Alice", "Bob", "Charlie", "David", "Erin", "Frank"];
pub const SERVER_ADDRS: [&str; 3] = ["Foo", "Bar", "Baz"];
pub const DEFAULT_DEPOSIT_AMOUNT: u64 = 10000;
pub const TEST_GAME_ACCOUNT_ADDR: &str = "COUNTER_GAME_ADDRESS";
pub const TEST_GAME_BUNDLE_ADDR: &str = "COUNTER_BUNDLE_ADDRESS";
pub const TEST_TRANSACTOR_ACCOUNT_ADDR: &str = "Foo";
pub const TEST_TRANSACTOR_OWNER_ADDR: &str = "DEFAULT_SERVER_ADDRESS";
pub const TEST_TRANSACTOR_ENDPOINT: &str = "http://localhost:10002";
