fn main() {
    println!("cargo:rerun-if-changed=schemas/shopify.graphql");
    cynic_codegen::register_schema("shopify")
        .from_sdl_file("schemas/shopify.graphql")
        .expect("failed to load shopify.graphql schema file")
        .as_default()
        .expect("failed to register shopify schema as default");
}
