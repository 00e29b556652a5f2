//! Generate a client API key and the hash to configure on the server.
//!
//! Give `API_KEY` to the client, put `API_KEY_HASH` in the server environment.

use nba_oracle::security::generate_api_key_and_hash;

fn main() {
    let (key, hash) = generate_api_key_and_hash();

    println!("API_KEY={}", key);
    println!("API_KEY_HASH={}", hash);
}
