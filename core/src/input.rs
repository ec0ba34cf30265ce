//! Platform-agnostic input types.
//!
//! Provides a [`KeyCode`] enum that identifies the keys a line viewer
//! reacts to without depending on any windowing crate.

/// Physical keyboard key identifier.
///
/// Names follow the US QWERTY layout. Platform layers (e.g. winit) map
/// their native key codes to this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCode {
    // Letters
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,

    // Common
    Space,
    Enter,
    Escape,
    Tab,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_codes_are_hashable() {
        let keys: HashSet<KeyCode> = [KeyCode::R, KeyCode::Escape, KeyCode::R]
            .into_iter()
            .collect();
        assert_eq!(keys.len(), 2);
    }
}
