//! CrudService: the application service every REST resource goes through.

mod crud;
pub use crud::CrudService;
