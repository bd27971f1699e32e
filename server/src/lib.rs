// Life of a request:
// 1. Login: credentials come in over HTTP
//     - Look up the user record and compare the secret
//     - Sign an access token carrying the user's identity
//     - Respond with the token
// 2. Authenticated request: bearer token comes in over HTTP
//     - Check signature, then expiry
//     - Run the optional post-verification hook
//     - Attach the identity to the request
//
// System components:
//  - Credential validator (auth::validator)
//  - Token issuer / verifier (auth::token)
//  - User store (user_store)

pub mod auth;
pub mod config;
pub mod http;
pub mod time;
pub mod user_store;

#[cfg(test)]
mod testing;
