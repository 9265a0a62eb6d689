//! Print the CustomResourceDefinitions as a multi-document YAML stream
//!
//! ```sh
//! cargo run --bin crdgen > config/crd/all.yaml
//! ```

use anyhow::Result;
use betterstack_operator::{Heartbeat, Monitor, MonitorGroup};
use kube::CustomResourceExt;

fn main() -> Result<()> {
    let documents = [
        serde_yaml::to_string(&Monitor::crd())?,
        serde_yaml::to_string(&MonitorGroup::crd())?,
        serde_yaml::to_string(&Heartbeat::crd())?,
    ];
    print!("{}", documents.join("---\n"));
    Ok(())
}
