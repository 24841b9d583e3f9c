use minifb::{Key, Window};

use crate::emulator::Emulator;

/// COSMAC pad layout on the left of a QWERTY board:
/// 1 2 3 4 / Q W E R / A S D F / Z X C V map to
/// 1 2 3 C / 4 5 6 D / 7 8 9 E / A 0 B F.
const KEYMAP: [(Key, u8); 16] = [
    (Key::Key1, 0x1),
    (Key::Key2, 0x2),
    (Key::Key3, 0x3),
    (Key::Key4, 0xC),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::R, 0xD),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::F, 0xE),
    (Key::Z, 0xA),
    (Key::X, 0x0),
    (Key::C, 0xB),
    (Key::V, 0xF),
];

/// Latches the window's current key state into the machine, between
/// cycles only. Fresh presses also resolve a pending FX0A wait.
pub fn latch_keys(window: &Window, emu: &mut Emulator) {
    for (key, index) in KEYMAP {
        if window.is_key_down(key) {
            emu.key_press(index);
        } else {
            emu.key_release(index);
        }
    }
}
