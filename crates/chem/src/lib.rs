//! # chem - multi environment manager
//!
//! Edit and inspect many json environment files at once.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `chem` works internally.
//!
//! ### Environments
//!
//! An environment is a json file holding a single object, for example `production.json`:
//! ```json
//! {
//!   "name": "production",
//!   "default_attributes": {
//!     "client": {
//!       "ldap_server": "ldap1.example.com"
//!     }
//!   },
//!   "run_list": ["recipe[base]"]
//! }
//! ```
//!
//! Environments are loaded as [value::Object], an order-preserving map, so writing a file
//! back only changes what was patched. Files and groups of files are handled by [environment].
//!
//! ### Patches
//!
//! A patch is an object with the same shape as the part of the environment it touches.
//! The usual way to create one is an attribute path (see [path::parse_path]):
//!
//! | **attribute**                                  | **patch**                                                 |
//! |------------------------------------------------|-----------------------------------------------------------|
//! | `default_attributes.client.ldap_server:ldap2`  | `{"default_attributes":{"client":{"ldap_server":"ldap2"}}}` |
//! | `override\.attributes:1`                       | `{"override.attributes":"1"}`                             |
//! | `run_list.[]:recipe[web]`                      | `{"run_list":["recipe[web]"]}`                            |
//! | `users.[].name:alice`                          | `{"users":[{"name":"alice"}]}`                            |
//!
//! Values from attribute paths are always strings.
//! Patches can also be written as json in a file or an editor (see [patch_source]). Those may
//! touch several branches at once.
//!
//! ### Actions
//!
//! - `set` and `unset` merge the patch into each environment via [patch::apply_patch]
//!   and write the result back.
//! - `get` follows the patch through each environment via [patch::view_patch] and prints
//!   what it finds. The patch value is ignored.
//!
//! The merge is intentionally blunt: mismatching types are overwritten, lists are appended to
//! but never merged element by element, and `unset` removes a key no matter what it holds.
//!
pub mod environment;
pub mod patch;
pub mod patch_source;
pub mod path;
pub mod value;
