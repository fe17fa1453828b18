use energraph_core::{
    short_repr, AttrValue, ClassDef, DescribeError, Describer, MetaError, MetamodelRegistry,
    Model, ModelObject, NodeId,
};

fn registry() -> MetamodelRegistry {
    let mut registry = MetamodelRegistry::new();
    let classes = [
        ClassDef::new("EnergySystem")
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("area", "Area", false, true),
        ClassDef::new("Area")
            .with_doc("Geographic grouping of assets.")
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("area", "Area", true, true)
            .with_reference("asset", "Asset", true, true),
        ClassDef::new("Port")
            .abstract_class()
            .with_attribute("name", "String"),
        ClassDef::new("InPort").with_super("Port"),
        ClassDef::new("OutPort").with_super("Port"),
        ClassDef::new("ControlStrategy").abstract_class(),
        ClassDef::new("CurtailmentStrategy").with_super("ControlStrategy"),
        ClassDef::new("Asset")
            .abstract_class()
            .with_attribute("id", "String")
            .with_attribute("name", "String")
            .with_reference("port", "Port", true, true)
            .with_reference("controlStrategy", "ControlStrategy", false, false),
        ClassDef::new("Producer").abstract_class().with_super("Asset"),
        ClassDef::new("WindTurbine")
            .with_doc("Converts wind into electricity.")
            .with_super("Producer")
            .with_attribute("rotorDiameter", "Float"),
    ];
    for class in classes {
        registry.register(class).unwrap();
    }
    registry
}

struct Fixture {
    model: Model,
    area: NodeId,
    turbine: NodeId,
    port: NodeId,
}

fn fixture() -> Fixture {
    let mut model = Model::new(ModelObject::new("EnergySystem").with_attr("name", "Demo"));
    let root = model.root();
    let area = model
        .set_child(root, "area", ModelObject::new("Area").with_attr("name", "A1"))
        .unwrap();
    let turbine = model
        .add_child(
            area,
            "asset",
            ModelObject::new("WindTurbine")
                .with_attr("id", "wt1")
                .with_attr("rotorDiameter", 120.0),
        )
        .unwrap();
    let port = model
        .add_child(
            turbine,
            "port",
            ModelObject::new("OutPort").with_attr("name", "P1"),
        )
        .unwrap();
    Fixture {
        model,
        area,
        turbine,
        port,
    }
}

#[test]
fn unnamed_object_with_id_describes_per_scenario() {
    let registry = registry();
    let fx = fixture();
    let info = Describer::new(&registry)
        .describe(&fx.model, fx.turbine)
        .unwrap();

    assert_eq!(info.object.name, "WindTurbine");
    assert_eq!(info.object.declared_type, "WindTurbine");
    assert_eq!(info.object.id.as_deref(), Some("wt1"));
    assert_eq!(info.object.fragment, None);
    assert_eq!(
        info.object.documentation.as_deref(),
        Some("Converts wind into electricity.")
    );

    let container = info.container.expect("turbine has a container chain");
    assert_eq!(container.name.as_deref(), Some("A1"));
    assert_eq!(container.declared_type, "Area");
    assert_eq!(container.id, None);
    assert_eq!(container.fragment.as_deref(), Some("//@area"));
    let root = container.container.expect("area is contained in the root");
    assert_eq!(root.declared_type, "EnergySystem");
    assert_eq!(root.container, None);
}

#[test]
fn root_area_scenario_yields_a_single_link_chain() {
    let registry = registry();
    let mut model = Model::new(ModelObject::new("Area").with_attr("name", "A1"));
    let turbine = model
        .add_child(model.root(), "asset", ModelObject::new("WindTurbine").with_attr("id", "wt1"))
        .unwrap();

    let info = Describer::new(&registry).describe(&model, turbine).unwrap();
    assert_eq!(info.object.name, "WindTurbine");
    assert_eq!(info.object.id.as_deref(), Some("wt1"));
    assert_eq!(info.object.declared_type, "WindTurbine");

    let container = info.container.expect("turbine is contained in the root");
    assert_eq!(container.name.as_deref(), Some("A1"));
    assert_eq!(container.fragment.as_deref(), Some("/"));
    assert_eq!(container.container, None);
}

#[test]
fn named_object_without_id_uses_name_and_fragment() {
    let registry = registry();
    let fx = fixture();
    let info = Describer::new(&registry).describe(&fx.model, fx.area).unwrap();

    assert_eq!(info.object.name, "A1");
    assert_eq!(info.object.id, None);
    assert_eq!(info.object.fragment.as_deref(), Some("//@area"));
}

#[test]
fn attributes_include_inherited_slots_with_current_values() {
    let registry = registry();
    let fx = fixture();
    let info = Describer::new(&registry)
        .describe(&fx.model, fx.turbine)
        .unwrap();

    let names: Vec<&str> = info
        .attributes
        .iter()
        .map(|attr| attr.name.as_str())
        .collect();
    assert_eq!(names, ["id", "name", "rotorDiameter"]);

    let id_attr = &info.attributes[0];
    assert_eq!(id_attr.value, Some(AttrValue::Str("wt1".to_string())));
    let name_attr = &info.attributes[1];
    assert_eq!(name_attr.value, None);
    let rotor = &info.attributes[2];
    assert_eq!(rotor.value, Some(AttrValue::Float(120.0)));
    assert_eq!(rotor.declared_type, "Float");
}

#[test]
fn references_render_targets_through_short_representation() {
    let registry = registry();
    let fx = fixture();
    let info = Describer::new(&registry)
        .describe(&fx.model, fx.turbine)
        .unwrap();

    let port_ref = info
        .references
        .iter()
        .find(|reference| reference.name == "port")
        .expect("port reference is declared");
    assert!(port_ref.many);
    assert_eq!(port_ref.repr, ["P1 (OutPort)"]);

    let strategy_ref = info
        .references
        .iter()
        .find(|reference| reference.name == "controlStrategy")
        .expect("controlStrategy reference is declared");
    assert!(!strategy_ref.many);
    assert!(strategy_ref.repr.is_empty());
}

#[test]
fn short_repr_follows_the_port_rule() {
    let registry = registry();
    let mut fx = fixture();
    let unnamed_port = fx
        .model
        .add_child(fx.turbine, "port", ModelObject::new("InPort"))
        .unwrap();
    let strategy = fx
        .model
        .add_child(fx.area, "asset", ModelObject::new("CurtailmentStrategy"))
        .unwrap();

    assert_eq!(short_repr(&fx.model, &registry, None), None);
    assert_eq!(
        short_repr(&fx.model, &registry, Some(fx.port)).as_deref(),
        Some("P1 (OutPort)")
    );
    assert_eq!(
        short_repr(&fx.model, &registry, Some(unnamed_port)).as_deref(),
        Some("InPort (InPort)")
    );
    assert_eq!(
        short_repr(&fx.model, &registry, Some(strategy)).as_deref(),
        Some("CurtailmentStrategy")
    );
}

#[test]
fn serialized_projection_keeps_id_fragment_exclusivity() {
    let registry = registry();
    let fx = fixture();
    let describer = Describer::new(&registry);

    let turbine_json =
        serde_json::to_value(describer.describe(&fx.model, fx.turbine).unwrap()).unwrap();
    assert_eq!(turbine_json["object"]["id"], "wt1");
    assert!(turbine_json["object"].get("fragment").is_none());

    let area_json = serde_json::to_value(describer.describe(&fx.model, fx.area).unwrap()).unwrap();
    assert_eq!(area_json["object"]["fragment"], "//@area");
    assert!(area_json["object"].get("id").is_none());
}

#[test]
fn unregistered_class_surfaces_a_metadata_error() {
    let registry = registry();
    let mut fx = fixture();
    let rogue = fx
        .model
        .add_child(fx.area, "asset", ModelObject::new("FusionReactor"))
        .unwrap();

    let err = Describer::new(&registry)
        .describe(&fx.model, rogue)
        .unwrap_err();
    assert!(matches!(
        err,
        DescribeError::Metadata(MetaError::UnknownType(name)) if name == "FusionReactor"
    ));
}
