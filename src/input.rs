// src/input.rs

/// Session commands produced from polled key events. At most one per
/// frame cycle; anything unmapped is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive region-selection gesture.
    Select,
    /// Leave the loop and release the frame source.
    Quit,
    Noop,
}

const KEY_ESC: u8 = 27;

pub fn command_for_key(key: i32) -> Command {
    if key < 0 {
        // wait_key timeout, no key pressed
        return Command::Noop;
    }
    match (key & 0xff) as u8 {
        b's' => Command::Select,
        b'c' | b'q' | KEY_ESC => Command::Quit,
        _ => Command::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_key_maps_to_select() {
        assert_eq!(command_for_key('s' as i32), Command::Select);
    }

    #[test]
    fn test_quit_keys_map_to_quit() {
        assert_eq!(command_for_key('c' as i32), Command::Quit);
        assert_eq!(command_for_key('q' as i32), Command::Quit);
        assert_eq!(command_for_key(27), Command::Quit);
    }

    #[test]
    fn test_timeout_and_other_keys_are_noop() {
        assert_eq!(command_for_key(-1), Command::Noop);
        assert_eq!(command_for_key('x' as i32), Command::Noop);
        assert_eq!(command_for_key(' ' as i32), Command::Noop);
    }

    #[test]
    fn test_high_bits_are_masked() {
        // some backends report key codes with modifier bits set
        assert_eq!(command_for_key(0x10_0073), Command::Select);
    }
}
