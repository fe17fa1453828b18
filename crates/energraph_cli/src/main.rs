//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `energraph_core` wiring.
//! - Print the JSON projection of one described demo object, which is the
//!   output surface downstream presentation layers consume.

use energraph_core::{
    ClassDef, DataLayer, Identifier, InMemoryModelStore, MetamodelRegistry, Model, ModelObject,
};

fn demo_metamodel() -> MetamodelRegistry {
    let mut registry = MetamodelRegistry::new();
    let classes = [
        ClassDef::new("EnergySystem")
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("area", "Area", false, true)
            .with_reference("services", "Services", false, true),
        ClassDef::new("Services").with_attribute("id", "String"),
        ClassDef::new("Area")
            .with_doc("Geographic grouping of assets.")
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("asset", "Asset", true, true),
        ClassDef::new("Port")
            .abstract_class()
            .with_attribute("name", "String"),
        ClassDef::new("OutPort").with_super("Port"),
        ClassDef::new("Asset")
            .abstract_class()
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("port", "Port", true, true),
        ClassDef::new("Producer").abstract_class().with_super("Asset"),
        ClassDef::new("WindTurbine")
            .with_doc("Converts wind into electricity.")
            .with_super("Producer")
            .with_attribute("rotorDiameter", "Float"),
    ];
    for class in classes {
        if let Err(err) = registry.register(class) {
            eprintln!("demo metamodel is inconsistent: {err}");
            std::process::exit(1);
        }
    }
    registry
}

fn demo_model() -> Model {
    let mut model = Model::new(ModelObject::new("EnergySystem").with_attr("name", "Demo system"));
    let root = model.root();
    let area = model
        .set_child(root, "area", ModelObject::new("Area").with_attr("name", "A1"))
        .expect("demo area");
    let turbine = model
        .add_child(
            area,
            "asset",
            ModelObject::new("WindTurbine")
                .with_attr("id", "wt1")
                .with_attr("rotorDiameter", 120.0),
        )
        .expect("demo turbine");
    model
        .add_child(
            turbine,
            "port",
            ModelObject::new("OutPort").with_attr("name", "Out"),
        )
        .expect("demo port");
    model
}

fn main() {
    if let Err(err) = energraph_core::init_logging(energraph_core::default_log_level(), None) {
        eprintln!("logging init failed: {err}");
    }

    let mut store = InMemoryModelStore::new();
    if let Err(err) = store.open_session("demo", demo_model()) {
        eprintln!("failed to open demo session: {err}");
        std::process::exit(1);
    }

    let layer = DataLayer::new(store, demo_metamodel());
    let info = match layer.describe("demo", &Identifier::by_id("wt1")) {
        Ok(info) => info,
        Err(err) => {
            eprintln!("describe failed: {err}");
            std::process::exit(1);
        }
    };

    println!("energraph_core version={}", energraph_core::core_version());
    match serde_json::to_string_pretty(&info) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("serialization failed: {err}");
            std::process::exit(1);
        }
    }
}
