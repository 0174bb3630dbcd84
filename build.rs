//! Retrieves information about the version of the crate from Git and the build
//! environment so that the driver can identify how it was built.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
