#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use morsel_client::{Settings, SettingsOverrides};

pub const HEADER: &str = "product,price,quantity,date,region";

pub fn write_file(path: &Path, body: &str) {
    if let Some(parent) = path.parent() {
        assert!(fs::create_dir_all(parent).is_ok());
    }
    let result = fs::write(path, body);
    assert!(result.is_ok());
}

pub fn settings_for(home: &Path) -> Settings {
    settings_with(SettingsOverrides {
        home: Some(home.to_path_buf()),
        ..SettingsOverrides::default()
    })
}

pub fn settings_with(overrides: SettingsOverrides) -> Settings {
    let resolved = Settings::resolve_with_env(&overrides, |_| None);
    assert!(resolved.is_ok());
    match resolved {
        Ok(settings) => settings,
        Err(error) => panic!("settings failed to resolve: {}", error.message),
    }
}

pub fn data_file(home: &Path, name: &str) -> PathBuf {
    home.join("data").join(name)
}

/// Three source files shaped like the daily sales exports: several products,
/// currency-formatted prices, one row per product/region/day.
pub fn seed_daily_sales(home: &Path) {
    write_file(
        &data_file(home, "daily_sales_data_0.csv"),
        &[
            HEADER,
            "pink morsel,$3.00,10,2018-02-05,north",
            "gold morsel,$9.99,4,2018-02-05,north",
            "pink morsel,$3.00,5,2018-02-05,south",
        ]
        .join("\n"),
    );
    write_file(
        &data_file(home, "daily_sales_data_1.csv"),
        &[
            HEADER,
            "pink morsel,$5.00,8,2018-02-06,north",
            "pink morsel,\"$1,234.50\",2,2018-02-06,east",
            "Pink Morsel,$5.00,99,2018-02-06,west",
        ]
        .join("\n"),
    );
    write_file(
        &data_file(home, "daily_sales_data_2.csv"),
        &[
            HEADER,
            "pink morsel,$3.00,1,2018-02-04,west",
            "vermilion morsel,$1.00,3,2018-02-04,west",
        ]
        .join("\n"),
    );
}

/// Sum of raw pink morsel quantities in [`seed_daily_sales`].
pub const SEEDED_PINK_QUANTITY: i64 = 10 + 5 + 8 + 2 + 1;
