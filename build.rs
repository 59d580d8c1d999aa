use chrono::{DateTime, Utc};

fn main() {
    // SOURCE_DATE_EPOCH pins the stamp for reproducible builds
    let build_time = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    // read by the footer's copyright year
    println!("cargo:rustc-env=BUILD_TIME={}", build_time.to_rfc3339());

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=build.rs");
}
