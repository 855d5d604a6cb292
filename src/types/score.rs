use serde::Serialize;

/// The seven scored criteria plus the total, regardless of how a form spelled them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CanonicalField {
    Decoration,
    Items,
    Dorm,
    FanTube,
    Footpath,
    Grass,
    Surrounding,
    Total,
}

impl CanonicalField {
    /// Criterion fields in display order; excludes `Total`.
    pub const CRITERIA: [CanonicalField; 7] = [
        Self::Decoration,
        Self::Items,
        Self::Dorm,
        Self::FanTube,
        Self::Footpath,
        Self::Grass,
        Self::Surrounding,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decoration => "decoration",
            Self::Items => "items",
            Self::Dorm => "dorm",
            Self::FanTube => "fanTube",
            Self::Footpath => "footpath",
            Self::Grass => "grass",
            Self::Surrounding => "surrounding",
            Self::Total => "total",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Decoration => "Decoration",
            Self::Items => "Items",
            Self::Dorm => "Dorm",
            Self::FanTube => "Fan & Tube",
            Self::Footpath => "Footpath",
            Self::Grass => "Grass",
            Self::Surrounding => "Surrounding",
            Self::Total => "Total",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalHouseScore {
    pub decoration: f64,
    pub items: f64,
    pub dorm: f64,
    pub fan_tube: f64,
    pub footpath: f64,
    pub grass: f64,
    pub surrounding: f64,
    pub total: f64,
}

impl CanonicalHouseScore {
    pub fn total_only(total: f64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn get(&self, field: CanonicalField) -> f64 {
        match field {
            CanonicalField::Decoration => self.decoration,
            CanonicalField::Items => self.items,
            CanonicalField::Dorm => self.dorm,
            CanonicalField::FanTube => self.fan_tube,
            CanonicalField::Footpath => self.footpath,
            CanonicalField::Grass => self.grass,
            CanonicalField::Surrounding => self.surrounding,
            CanonicalField::Total => self.total,
        }
    }

    pub fn slot_mut(&mut self, field: CanonicalField) -> &mut f64 {
        match field {
            CanonicalField::Decoration => &mut self.decoration,
            CanonicalField::Items => &mut self.items,
            CanonicalField::Dorm => &mut self.dorm,
            CanonicalField::FanTube => &mut self.fan_tube,
            CanonicalField::Footpath => &mut self.footpath,
            CanonicalField::Grass => &mut self.grass,
            CanonicalField::Surrounding => &mut self.surrounding,
            CanonicalField::Total => &mut self.total,
        }
    }

    pub fn criteria(&self) -> [f64; 7] {
        CanonicalField::CRITERIA.map(|field| self.get(field))
    }

    pub fn criteria_sum(&self) -> f64 {
        self.criteria().iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0.0 && self.criteria().iter().all(|value| *value == 0.0)
    }
}

/// One house's normalized score from one stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub house: String,
    pub category: String,
    pub judge: String,
    pub collection: String,
    pub document: String,
    pub score: CanonicalHouseScore,
}
