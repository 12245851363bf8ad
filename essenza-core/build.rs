fn main() {
    // Short random build id, exposed as BUILD_ID for the HTTP user agent.
    let id = uuid::Uuid::new_v4().simple().to_string();
    let short_id: String = id.chars().take(8).collect();
    println!("cargo:rustc-env=BUILD_ID={}", short_id);
}
