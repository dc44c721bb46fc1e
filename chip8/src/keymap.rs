use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
///
/// Any other key is left to the event loop.
pub fn keymap(key: Keycode) -> Option<u8> {
    let key = match key {
        Keycode::Num1 => 0x1,
        Keycode::Num2 => 0x2,
        Keycode::Num3 => 0x3,
        Keycode::Num4 => 0xC,
        Keycode::Q => 0x4,
        Keycode::W => 0x5,
        Keycode::E => 0x6,
        Keycode::R => 0xD,
        Keycode::A => 0x7,
        Keycode::S => 0x8,
        Keycode::D => 0x9,
        Keycode::F => 0xE,
        Keycode::Z => 0xA,
        Keycode::X => 0x0,
        Keycode::C => 0xB,
        Keycode::V => 0xF,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keypad_key_is_mapped_once() {
        let rows = [
            [Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4],
            [Keycode::Q, Keycode::W, Keycode::E, Keycode::R],
            [Keycode::A, Keycode::S, Keycode::D, Keycode::F],
            [Keycode::Z, Keycode::X, Keycode::C, Keycode::V],
        ];
        let mut keys: Vec<u8> = rows.iter().flatten().filter_map(|&k| keymap(k)).collect();
        keys.sort_unstable();
        assert_eq!(keys, (0x0..=0xF).collect::<Vec<u8>>());
    }

    #[test]
    fn test_keypad_layout() {
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::X), Some(0x0));
        assert_eq!(keymap(Keycode::V), Some(0xF));
    }

    #[test]
    fn test_controls_are_not_keypad_keys() {
        assert_eq!(keymap(Keycode::Space), None);
        assert_eq!(keymap(Keycode::Escape), None);
    }
}
