use energraph_core::{ClassDef, MetaError, MetadataProvider, MetamodelRegistry};

fn asset_hierarchy() -> MetamodelRegistry {
    let mut registry = MetamodelRegistry::new();
    let classes = [
        ClassDef::new("Item")
            .abstract_class()
            .with_doc("Base of everything addressable.")
            .with_attribute("id", "String")
            .with_attribute("name", "String"),
        ClassDef::new("Asset")
            .abstract_class()
            .with_super("Item")
            .with_attribute("state", "String")
            .with_reference("port", "Port", true, true),
        ClassDef::new("Port").abstract_class().with_super("Item"),
        ClassDef::new("InPort").with_super("Port"),
        ClassDef::new("OutPort").with_super("Port"),
        ClassDef::new("Producer").abstract_class().with_super("Asset"),
        ClassDef::new("WindTurbine")
            .with_super("Producer")
            .with_attribute("rotorDiameter", "Float"),
        ClassDef::new("PVParc").with_super("Producer"),
    ];
    for class in classes {
        registry.register(class).unwrap();
    }
    registry
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = asset_hierarchy();
    let err = registry.register(ClassDef::new("WindTurbine")).unwrap_err();
    assert_eq!(err, MetaError::DuplicateType("WindTurbine".to_string()));
}

#[test]
fn unknown_supertype_is_rejected() {
    let mut registry = MetamodelRegistry::new();
    let err = registry
        .register(ClassDef::new("WindTurbine").with_super("Producer"))
        .unwrap_err();
    assert_eq!(
        err,
        MetaError::UnknownSupertype {
            class: "WindTurbine".to_string(),
            supertype: "Producer".to_string(),
        }
    );
}

#[test]
fn attribute_enumeration_lists_supertype_slots_first() {
    let registry = asset_hierarchy();
    let names: Vec<String> = registry
        .attributes_of("WindTurbine")
        .unwrap()
        .into_iter()
        .map(|slot| slot.name)
        .collect();
    assert_eq!(names, ["id", "name", "state", "rotorDiameter"]);
}

#[test]
fn redeclared_slot_is_listed_once_with_the_subclass_shape() {
    let mut registry = asset_hierarchy();
    registry
        .register(
            ClassDef::new("GeothermalSource")
                .with_super("Producer")
                .with_attribute("state", "GeothermalState"),
        )
        .unwrap();

    let slots = registry.attributes_of("GeothermalSource").unwrap();
    let state: Vec<_> = slots.iter().filter(|slot| slot.name == "state").collect();
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].declared_type, "GeothermalState");
}

#[test]
fn reference_enumeration_is_inherited() {
    let registry = asset_hierarchy();
    let references = registry.references_of("WindTurbine").unwrap();
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].name, "port");
    assert!(references[0].many);
    assert!(references[0].containment);
}

#[test]
fn assignable_types_are_concrete_and_in_registration_order() {
    let registry = asset_hierarchy();
    assert_eq!(
        registry.types_assignable_to("Producer").unwrap(),
        ["WindTurbine", "PVParc"]
    );
    assert_eq!(
        registry.types_assignable_to("Port").unwrap(),
        ["InPort", "OutPort"]
    );
    // Concrete classes include themselves.
    assert_eq!(
        registry.types_assignable_to("WindTurbine").unwrap(),
        ["WindTurbine"]
    );
}

#[test]
fn assignable_types_of_unknown_type_fail() {
    let registry = asset_hierarchy();
    let err = registry.types_assignable_to("Nonsense").unwrap_err();
    assert_eq!(err, MetaError::UnknownType("Nonsense".to_string()));
}

#[test]
fn assignability_is_transitive_and_unknown_names_never_match() {
    let registry = asset_hierarchy();
    assert!(registry.is_assignable("WindTurbine", "Item"));
    assert!(registry.is_assignable("WindTurbine", "WindTurbine"));
    assert!(!registry.is_assignable("WindTurbine", "Port"));
    assert!(!registry.is_assignable("Ghost", "Item"));
    assert!(!registry.is_assignable("WindTurbine", "Ghost"));
}

#[test]
fn documentation_is_returned_when_declared() {
    let registry = asset_hierarchy();
    assert_eq!(
        registry.documentation_of("Item").unwrap().as_deref(),
        Some("Base of everything addressable.")
    );
    assert_eq!(registry.documentation_of("InPort").unwrap(), None);
    assert!(registry.documentation_of("Ghost").is_err());
}
