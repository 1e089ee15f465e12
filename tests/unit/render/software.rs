use super::*;

use crate::surface::color::Color;

fn surface_cache(
    catalog: &BackendCatalog,
    backend: &SoftwareBackend,
    surface: Surface,
) -> PrimitiveCache {
    let mut cache = PrimitiveCache::new(PrimitiveType::Surface);
    assert!(cache.store(catalog, backend.id(), Primitive::Surface(surface)));
    cache
}

#[test]
fn install_registers_create_and_copy_for_every_type() {
    let mut catalog = BackendCatalog::new();
    let mut backend = SoftwareBackend::install(&mut catalog, SoftwareBackendOpts::default());
    let id = backend.id();
    assert!(id.is_registered());
    for ty in PrimitiveType::ALL {
        assert!(catalog.has_create(ty, id));
        assert!(catalog.has_copy(ty, id));
        assert!(backend.is_primitive_supported(ty));
    }

    backend.uninstall(&mut catalog);
    assert_eq!(backend.id(), BackendId::UNREGISTERED);
    assert!(!catalog.is_registered(id));
    assert!(!catalog.has_create(PrimitiveType::Mesh, id));
}

#[test]
fn opts_default_to_no_culling() {
    assert!(!SoftwareBackendOpts::default().cull_offscreen_triangles);
    if std::env::var_os("TESSERA_CULL_OFFSCREEN_TRIANGLES").is_none() {
        assert_eq!(SoftwareBackendOpts::from_env(), SoftwareBackendOpts::default());
    }
}

#[test]
fn non_surface_output_fails() {
    let mut catalog = BackendCatalog::new();
    let mut backend = SoftwareBackend::install(&mut catalog, SoftwareBackendOpts::default());
    let src = surface_cache(&catalog, &backend, Surface::filled(2, 2, Color::RED).unwrap());
    let mut out = PrimitiveCache::new(PrimitiveType::Polygon);

    let err = backend
        .render(&catalog, &mut RenderParams::new(&mut out), &src)
        .unwrap_err();
    assert!(matches!(err, TesseraError::Fail(_)), "{err}");
}

#[test]
fn render_surface_composites_top_left_clipped() {
    let mut catalog = BackendCatalog::new();
    let mut backend = SoftwareBackend::install(&mut catalog, SoftwareBackendOpts::default());
    let src = surface_cache(&catalog, &backend, Surface::filled(2, 5, Color::RED).unwrap());
    let mut out = surface_cache(&catalog, &backend, Surface::filled(3, 3, Color::BLUE).unwrap());

    backend
        .render(&catalog, &mut RenderParams::new(&mut out).with_amount(0.5), &src)
        .unwrap();

    let rep = out.get_primitive(&catalog, backend.id()).unwrap();
    let s = rep.as_surface().unwrap();
    assert!(s.get(1, 2).unwrap().approx_eq(Color::new(0.5, 0.0, 0.5, 1.0), 1e-6));
    assert_eq!(s.get(2, 0), Some(Color::BLUE));
}

#[test]
fn edited_input_fails_and_empty_input_fails() {
    let mut catalog = BackendCatalog::new();
    let mut backend = SoftwareBackend::install(&mut catalog, SoftwareBackendOpts::default());
    let mut out = surface_cache(&catalog, &backend, Surface::filled(2, 2, Color::BLUE).unwrap());

    let empty = PrimitiveCache::new(PrimitiveType::Polygon);
    let err = backend
        .render(&catalog, &mut RenderParams::new(&mut out), &empty)
        .unwrap_err();
    assert!(matches!(err, TesseraError::Fail(_)), "{err}");

    let mut busy = PrimitiveCache::new(PrimitiveType::Polygon);
    busy.begin_edit(&catalog, backend.id()).unwrap();
    let err = backend
        .render(&catalog, &mut RenderParams::new(&mut out), &busy)
        .unwrap_err();
    assert!(matches!(err, TesseraError::Fail(_)), "{err}");
}

#[test]
fn bad_polygon_indices_fail() {
    let mut catalog = BackendCatalog::new();
    let mut backend = SoftwareBackend::install(&mut catalog, SoftwareBackendOpts::default());
    let mut out = surface_cache(&catalog, &backend, Surface::new(4, 4).unwrap());

    let mut poly = PrimitiveCache::new(PrimitiveType::Polygon);
    let broken = crate::primitive::data::Polygon {
        vertices: Vec::new(),
        triangles: vec![[0, 1, 2]],
    };
    assert!(poly.store(&catalog, backend.id(), Primitive::Polygon(broken)));

    let err = backend
        .render(&catalog, &mut RenderParams::new(&mut out), &poly)
        .unwrap_err();
    assert!(err.to_string().contains("references vertex 0"), "{err}");
}
