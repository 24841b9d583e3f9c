/// Documented points of divergence among historical CHIP-8 interpreters.
///
/// The defaults match the original COSMAC VIP: shifts read Vy, BNNN
/// offsets with V0, and sprites clip at the screen edge. Later
/// interpreters (S-CHIP, CHIP-48) changed each of these, and some ROMs
/// only run with the newer behavior, so all three are switchable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE shift Vx in place instead of reading Vy.
    pub shift_in_place: bool,
    /// BNNN jumps to XNN + Vx instead of NNN + V0.
    pub jump_offset_vx: bool,
    /// Sprite rows and columns wrap around the screen edge instead of
    /// clipping.
    pub sprite_wrap: bool,
}
