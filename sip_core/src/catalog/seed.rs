//! Canonical seed price list.
//!
//! Names, units and categories here are authoritative for budget display;
//! the live catalog may override prices only.

use once_cell::sync::Lazy;

use super::PriceItem;

/// Material ids emitted by the quantity deriver.
pub mod ids {
    pub const VIGA_TECHO_3X6: &str = "VIGA_TECHO_3X6";
    pub const VIGA_PISO_3X6: &str = "VIGA_PISO_3X6";
    pub const MADERA_2X3: &str = "MADERA_2X3";
    pub const MADERA_1X4: &str = "MADERA_1X4";
    pub const LISTON_2X2: &str = "LISTON_2X2";
    pub const VARILLA_12: &str = "VARILLA_12";
    pub const ANCLAJE_QUIMICO: &str = "ANCLAJE_QUIMICO";
    pub const KIT_TUERCA_ARANDELA: &str = "KIT_TUERCA_ARANDELA";
    pub const TORNILLO_6X1_5: &str = "TORNILLO_6X1_5";
    pub const TORNILLO_6X2: &str = "TORNILLO_6X2";
    pub const TORNILLO_8X3: &str = "TORNILLO_8X3";
    pub const TORNILLO_HEX_14X3: &str = "TORNILLO_HEX_14X3";
    pub const TORX_140: &str = "TORX_140";
    pub const TORNILLO_HEX_14X5: &str = "TORNILLO_HEX_14X5";
    pub const TORX_120: &str = "TORX_120";
    pub const ESPUMA_PU: &str = "ESPUMA_PU";
    pub const ADHESIVO_PU: &str = "ADHESIVO_PU";
    pub const MEMBRANA_LIQUIDA: &str = "MEMBRANA_LIQUIDA";
    pub const BARRERA_HIDROFUGA: &str = "BARRERA_HIDROFUGA";
    pub const MEMBRANA_AUTOADHESIVA: &str = "MEMBRANA_AUTOADHESIVA";
    pub const CHAPA_C27: &str = "CHAPA_C27";
    pub const DETALLE_INGENIERIA: &str = "DETALLE_INGENIERIA";
}

pub const CAT_PANELES: &str = "1. SISTEMA DE PANELES";
pub const CAT_ESTRUCTURA: &str = "2. ESTRUCTURA Y MADERA";
pub const CAT_ANCLAJES: &str = "3. ANCLAJES";
pub const CAT_FIJACIONES: &str = "4. FIJACIONES";
pub const CAT_QUIMICOS: &str = "5. QUÍMICOS Y SELLOS";
pub const CAT_CUBIERTA: &str = "6. CUBIERTA";
pub const CAT_SERVICIOS: &str = "7. SERVICIOS";

#[rustfmt::skip]
const SEED: &[(&str, &str, &str, &str, f64)] = &[
    // Panels
    ("OSB-70-E", "Panel SIP OSB 70mm Muro", "UNID", CAT_PANELES, 106_097.0),
    ("OSB-90-E", "Panel SIP OSB 90mm Muro", "UNID", CAT_PANELES, 118_450.0),
    ("OSB-70-I", "Panel SIP OSB 70mm Tabique", "UNID", CAT_PANELES, 98_500.0),
    ("OSB-120-P", "Panel SIP OSB 120mm Piso", "UNID", CAT_PANELES, 132_900.0),
    ("OSB-120-T", "Panel SIP OSB 120mm Techo", "UNID", CAT_PANELES, 134_500.0),
    ("OSB-160-T", "Panel SIP OSB 160mm Techo", "UNID", CAT_PANELES, 152_300.0),
    ("SAND-50-T", "Panel Sandwich PIR 50mm", "M2", CAT_PANELES, 38_900.0),
    ("SAND-75-T", "Panel Sandwich PIR 75mm", "M2", CAT_PANELES, 45_600.0),
    // Lumber
    (ids::VIGA_TECHO_3X6, "Viga estructural 3x6\" techo", "UNID", CAT_ESTRUCTURA, 15_890.0),
    (ids::VIGA_PISO_3X6, "Viga estructural 3x6\" piso", "UNID", CAT_ESTRUCTURA, 15_890.0),
    (ids::MADERA_2X3, "Madera amarre 2x3\"", "UNID", CAT_ESTRUCTURA, 3_490.0),
    (ids::MADERA_1X4, "Solera base 1x4\"", "UNID", CAT_ESTRUCTURA, 2_190.0),
    (ids::LISTON_2X2, "Listón 2x2\"", "UNID", CAT_ESTRUCTURA, 1_590.0),
    // Anchoring
    (ids::VARILLA_12, "Varilla roscada 1/2\"", "UNID", CAT_ANCLAJES, 4_990.0),
    (ids::ANCLAJE_QUIMICO, "Anclaje químico", "UNID", CAT_ANCLAJES, 18_990.0),
    (ids::KIT_TUERCA_ARANDELA, "Kit tuerca + golilla 1/2\"", "UNID", CAT_ANCLAJES, 590.0),
    // Fasteners
    (ids::TORNILLO_6X1_5, "Tornillo fijación 6x1 1/2\"", "UNID", CAT_FIJACIONES, 25.0),
    (ids::TORNILLO_6X2, "Tornillo fijación 6x2\"", "UNID", CAT_FIJACIONES, 35.0),
    (ids::TORNILLO_8X3, "Tornillo fijación 8x3\"", "UNID", CAT_FIJACIONES, 60.0),
    (ids::TORNILLO_HEX_14X3, "Tornillo hexagonal 14x3\"", "UNID", CAT_FIJACIONES, 120.0),
    (ids::TORX_140, "Tornillo Torx 140mm", "UNID", CAT_FIJACIONES, 350.0),
    (ids::TORNILLO_HEX_14X5, "Tornillo hexagonal 14x5\" sandwich", "UNID", CAT_FIJACIONES, 190.0),
    (ids::TORX_120, "Tornillo Torx 120mm", "UNID", CAT_FIJACIONES, 290.0),
    // Chemicals
    (ids::ESPUMA_PU, "Espuma poliuretano", "UNID", CAT_QUIMICOS, 6_990.0),
    (ids::ADHESIVO_PU, "Adhesivo PU", "UNID", CAT_QUIMICOS, 8_990.0),
    (ids::MEMBRANA_LIQUIDA, "Membrana líquida 20 L", "UNID", CAT_QUIMICOS, 45_990.0),
    (ids::BARRERA_HIDROFUGA, "Barrera viento y agua 30 m²", "ROLLO", CAT_QUIMICOS, 52_990.0),
    (ids::MEMBRANA_AUTOADHESIVA, "Membrana autoadhesiva 25 m", "ROLLO", CAT_QUIMICOS, 24_990.0),
    // Roofing
    (ids::CHAPA_C27, "Chapa C27", "M2", CAT_CUBIERTA, 8_990.0),
    // Services
    (ids::DETALLE_INGENIERIA, "Detalle de ingeniería", "M2", CAT_SERVICIOS, 4_500.0),
];

/// The seed catalog, built once.
pub static SEED_CATALOG: Lazy<Vec<PriceItem>> = Lazy::new(|| {
    SEED.iter()
        .map(|&(id, name, unit, category, price)| PriceItem {
            id: id.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            category: category.to_string(),
            price,
        })
        .collect()
});

/// Look up a seed entry by id
pub fn seed_item(id: &str) -> Option<&'static PriceItem> {
    SEED_CATALOG.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique() {
        let ids: HashSet<_> = SEED_CATALOG.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), SEED_CATALOG.len());
    }

    #[test]
    fn test_seed_lookup() {
        let item = seed_item("OSB-70-E").unwrap();
        assert_eq!(item.price, 106_097.0);
        assert_eq!(item.category, CAT_PANELES);
        assert!(seed_item(ids::CHAPA_C27).is_some());
        assert!(seed_item("NOPE").is_none());
    }
}
