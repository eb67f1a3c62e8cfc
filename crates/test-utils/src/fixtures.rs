//! Common test fixtures for relay tests.

/// Hotspot filenames as they appear on the INPE server.
pub mod filenames {
    pub const MONTHLY_2024_03: &str = "focos_mensal_br_202403.csv";
    pub const MONTHLY_2023_12: &str = "focos_mensal_br_202312.csv";
    pub const YEARLY_2023: &str = "focos_br_todos-sats_2023.csv";
    pub const TEN_MINUTE_1200: &str = "focos_10min_20240315_1200.csv";
    pub const TEN_MINUTE_1210: &str = "focos_10min_20240315_1210.csv";

    /// Short form used in date-parsing examples.
    pub const FOCO_2024_03: &str = "foco_202403.csv";
    /// Last token is not numeric.
    pub const FOCO_BAD: &str = "foco_bad.csv";
    /// Last token has 4 digits instead of 6.
    pub const FOCO_YEAR_ONLY: &str = "foco_2024.csv";
    /// Month 13.
    pub const FOCO_MONTH_13: &str = "foco_202413.csv";
}

/// GeoJSON geometries posted by the map front end.
pub mod geometry {
    /// A small polygon near Porto Velho, RO.
    pub const POLYGON: &str = r#"{
        "type": "Polygon",
        "coordinates": [[
            [-63.95, -8.80], [-63.85, -8.80], [-63.85, -8.70],
            [-63.95, -8.70], [-63.95, -8.80]
        ]]
    }"#;

    pub const MULTIPOLYGON: &str = r#"{
        "type": "MultiPolygon",
        "coordinates": [
            [[[-63.95, -8.80], [-63.85, -8.80], [-63.85, -8.70], [-63.95, -8.80]]],
            [[[-60.10, -9.10], [-60.00, -9.10], [-60.00, -9.00], [-60.10, -9.10]]]
        ]
    }"#;

    /// Valid GeoJSON, but not an area.
    pub const POINT: &str = r#"{"type": "Point", "coordinates": [-63.9, -8.76]}"#;

    /// Burn scar outline as a backend would return it.
    pub const SCAR: &str = r#"{
        "type": "MultiPolygon",
        "coordinates": [
            [[[-63.93, -8.78], [-63.90, -8.78], [-63.90, -8.75], [-63.93, -8.78]]]
        ]
    }"#;
}

/// Upstream locations used by tests.
pub mod urls {
    pub const BASE: &str = "https://dataserver-coids.inpe.br/queimadas/queimadas/focos/csv/";
    pub const TILE: &str =
        "https://earthengine.googleapis.com/v1/projects/demo/maps/abc123/tiles/{z}/{x}/{y}";
}
