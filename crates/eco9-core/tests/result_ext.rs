// SPDX-License-Identifier: Apache-2.0

use eco9_core::ResultExt;

#[test]
fn result_ext_attaches_static_context_without_allocation() {
    let r: Result<(), &str> = Err("bad");
    let err = r.with_context("load multiplier table").expect_err("must error");
    assert_eq!(err.context, "load multiplier table");
    assert_eq!(err.source, "bad");
    assert_eq!(err.to_string(), "load multiplier table: bad");
}
