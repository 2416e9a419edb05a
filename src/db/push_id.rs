use chrono::Utc;
use rand::Rng;
use std::sync::Mutex;

// Modified base64 alphabet whose characters sort in ASCII order, so keys
// sort chronologically as plain strings.
const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Generates unique, chronologically ordered child keys on the client.
///
/// A key is 20 characters: 8 encoding the millisecond timestamp followed by
/// 12 of entropy. Keys minted within the same millisecond reuse the previous
/// entropy incremented by one, which keeps them strictly increasing within a
/// process.
pub struct PushIdGenerator {
    state: Mutex<State>,
}

struct State {
    last_ms: i64,
    // Entropy tail as indices into PUSH_CHARS.
    last_rand: [u8; 12],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                last_ms: 0,
                last_rand: [0; 12],
            }),
        }
    }

    pub fn generate(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if now != state.last_ms {
            state.last_ms = now;
            let mut rng = rand::rng();
            for slot in state.last_rand.iter_mut() {
                *slot = rng.random_range(0..64u8);
            }
        } else {
            for slot in state.last_rand.iter_mut().rev() {
                if *slot < 63 {
                    *slot += 1;
                    break;
                }
                *slot = 0;
            }
        }

        let mut prefix = [0u8; 8];
        let mut ts = now;
        for slot in prefix.iter_mut().rev() {
            *slot = (ts % 64) as u8;
            ts /= 64;
        }

        let mut id = String::with_capacity(20);
        for &index in prefix.iter().chain(state.last_rand.iter()) {
            id.push(PUSH_CHARS[index as usize] as char);
        }
        id
    }
}

impl Default for PushIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
