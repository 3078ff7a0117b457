use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

/// rand is built without getrandom, so the seed comes from the page.
#[cfg(target_arch = "wasm32")]
pub fn seeded_rng() -> StdRng {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    StdRng::seed_from_u64((now_ms() as u64) ^ (noise << 32))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seeded_rng() -> StdRng {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos)
}
