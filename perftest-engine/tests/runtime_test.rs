//! Tests for runtime validation, binary lookup and command construction.

use std::fs;
use std::path::Path;

use perftest_core::errors::{ArgumentError, NotFoundError, RunError};
use perftest_core::{Backend, Domain, Grid, Precision, RuntimeKind};
use perftest_engine::runtime::discover_info;
use perftest_engine::{CommandBuilder, GridtoolsRuntime, Kernel, Runtime, StellaRuntime};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn domain() -> Domain {
    Domain::new(128, 128, 80).unwrap()
}

#[test]
fn stella_rejects_icosahedral_grid() {
    let err = StellaRuntime::new("/opt/stella", Grid::Icgrid, Precision::Double, Backend::Host)
        .unwrap_err();
    assert!(matches!(err, ArgumentError::UnsupportedGrid { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid grid \"icgrid\", supported are \"strgrid\""
    );
}

#[test]
fn gridtools_accepts_both_grids() {
    for grid in Grid::ALL {
        assert!(Runtime::validate(RuntimeKind::Gridtools, *grid, Precision::Float, Backend::Cuda).is_ok());
    }
}

#[test]
fn validation_happens_at_construction() {
    let result = Runtime::new(
        RuntimeKind::Stella,
        "/does/not/exist",
        Grid::Icgrid,
        Precision::Float,
        Backend::Cuda,
    );
    assert!(result.is_err());
}

#[test]
fn stella_command_uses_filter_and_plain_domain() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("StandaloneStencils"));
    let runtime = StellaRuntime::new(dir.path(), Grid::Strgrid, Precision::Float, Backend::Host).unwrap();
    let kernel = Kernel::new("horizontal_diffusion", "regression/horizontal_diffusion", 2)
        .with_stella_filter("HorizontalDiffusion.*");

    let command = runtime.build_command(&kernel, domain()).unwrap();
    let binary = dir.path().join("StandaloneStencils");
    assert_eq!(
        command,
        format!(
            "{} --ie 128 --je 128 --ke 80 --gtest_filter=HorizontalDiffusion.*",
            binary.display()
        )
    );
}

#[test]
fn stella_cuda_binary_has_suffix() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("StandaloneStencilsCUDA"));
    let runtime = StellaRuntime::new(dir.path(), Grid::Strgrid, Precision::Double, Backend::Cuda).unwrap();
    assert_eq!(
        runtime.binary_path().unwrap(),
        dir.path().join("StandaloneStencilsCUDA")
    );
}

#[test]
fn stella_kernel_without_filter_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("StandaloneStencils"));
    let runtime = StellaRuntime::new(dir.path(), Grid::Strgrid, Precision::Float, Backend::Host).unwrap();
    let kernel = Kernel::new("laplace", "regression/icosahedral/laplace", 1);

    let err = runtime.build_command(&kernel, domain()).unwrap_err();
    assert!(matches!(err, RunError::Argument(ArgumentError::Unknown { .. })));
}

#[test]
fn gridtools_command_adds_halo_and_steps() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("regression/horizontal_diffusion_cuda"));
    let runtime = GridtoolsRuntime::new(dir.path(), Grid::Strgrid, Precision::Double, Backend::Cuda).unwrap();
    let kernel = Kernel::new("horizontal_diffusion", "regression/horizontal_diffusion", 2);

    let command = runtime.build_command(&kernel, domain()).unwrap();
    let binary = dir.path().join("regression/horizontal_diffusion_cuda");
    assert_eq!(command, format!("{} 132 132 84 10", binary.display()));
}

#[test]
fn gridtools_domain_overflowing_with_halo_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("regression/horizontal_diffusion_host"));
    let runtime = GridtoolsRuntime::new(dir.path(), Grid::Strgrid, Precision::Double, Backend::Host).unwrap();
    let kernel = Kernel::new("horizontal_diffusion", "regression/horizontal_diffusion", 2);

    let err = runtime
        .build_command(&kernel, Domain::new(u32::MAX, 128, 80).unwrap())
        .unwrap_err();
    assert!(matches!(err, RunError::Argument(ArgumentError::InvalidDomain { .. })));
}

#[test]
fn missing_binary_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = Runtime::new(
        RuntimeKind::Gridtools,
        dir.path(),
        Grid::Strgrid,
        Precision::Double,
        Backend::Host,
    )
    .unwrap();
    let kernel = Kernel::new("copy_stencil", "regression/copy_stencil", 0);

    let err = runtime.build_command(&kernel, domain()).unwrap_err();
    match err {
        RunError::NotFound(NotFoundError::Binary { runtime, path }) => {
            assert_eq!(runtime, "gridtools");
            assert_eq!(path, dir.path().join("regression/copy_stencil_host"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn directory_is_not_a_binary() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("StandaloneStencils")).unwrap();
    let runtime = StellaRuntime::new(dir.path(), Grid::Strgrid, Precision::Float, Backend::Host).unwrap();
    assert!(runtime.binary_path().is_err());
}

#[test]
fn info_outside_repository_is_unknown() {
    let dir = tempfile::tempdir().unwrap();
    let info = discover_info(RuntimeKind::Stella, dir.path());
    // The temp dir could sit inside a checkout on some machines; only
    // assert on the fields that do not depend on that.
    assert_eq!(info.name, "stella");
    assert_eq!(info.path, dir.path());
}

#[test]
fn info_reads_head_commit() {
    let dir = tempfile::tempdir().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    let sig = git2::Signature::new(
        "perftest",
        "perftest@example.com",
        &git2::Time::new(1_600_000_000, 0),
    )
    .unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let oid = repo
        .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();

    let build = dir.path().join("build");
    fs::create_dir_all(&build).unwrap();
    let runtime = Runtime::new(
        RuntimeKind::Gridtools,
        &build,
        Grid::Strgrid,
        Precision::Double,
        Backend::Host,
    )
    .unwrap();

    let info = runtime.runtime_info();
    assert_eq!(info.name, "gridtools");
    assert_eq!(info.version, oid.to_string());
    assert_eq!(info.datetime.unwrap().timestamp(), 1_600_000_000);
}
