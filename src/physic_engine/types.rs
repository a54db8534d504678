use glam::Vec2;

// ------------------------
// LaunchInfo
// ------------------------
/// Couleur et identité d'une fusée fraîchement lancée, renvoyées au caller
/// (le simulateur s'en sert pour l'observateur de couleur d'accent).
#[derive(Debug, Clone, Copy)]
pub struct LaunchInfo {
    pub id: u64,
    pub hue: f32,
    pub brightness: f32,
}

// ------------------------
// BurstEvent
// ------------------------
/// Une explosion déclenchée pendant un tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurstEvent {
    pub pos: Vec2,
    pub particles: usize,
}

// ------------------------
// UpdateResult
// ------------------------
pub struct UpdateResult<'a> {
    pub bursts: &'a [BurstEvent],
}
