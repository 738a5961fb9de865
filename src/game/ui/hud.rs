// Player health and charge bars

/// Slider values and labels for the player HUD
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerHud {
    max_health: f32,
    /// Health bar fill in [0, 1]
    pub health_slider: f32,
    pub health_text: String,
    /// Charge bar fill in [0, 1]
    pub charge_slider: f32,
    pub charge_text: String,
}

impl PlayerHud {
    pub fn new(max_health: f32) -> Self {
        let mut hud = Self {
            max_health,
            health_slider: 0.0,
            health_text: String::new(),
            charge_slider: 0.0,
            charge_text: String::new(),
        };
        hud.update_health(max_health);
        hud.update_charge(1.0);
        hud
    }

    pub fn update_health(&mut self, health: f32) {
        self.health_slider = if self.max_health > 0.0 {
            (health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.health_text = format!("HP: {health}");
    }

    pub fn update_charge(&mut self, charge: f32) {
        self.charge_slider = charge.clamp(0.0, 1.0);
        self.charge_text = format!("Charge: {}", (charge * 100.0).round());
    }
}
