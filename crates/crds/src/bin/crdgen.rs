//! Print the CRDs of every modelled resource as a YAML stream
//!
//! Usage: `cargo run -p crds --bin crdgen > crds.yaml`

fn main() -> anyhow::Result<()> {
    print!("{}", crds::crds_yaml()?);
    Ok(())
}
