// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod delay;
mod echo;
mod jump;
mod mark;
mod ward;

pub use delay::Delay;
pub use echo::Echo;
pub use jump::{Jump, DEFAULT_JUMP_STRENGTH};
pub use mark::{Mark, LAST_MARK_KEY};
pub use ward::{Ward, WARDED_KEY};
