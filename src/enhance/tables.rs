use crate::dom::{self, has_class, DomResult};

const TABLE_SELECTOR: &str = ".content table";
const WRAPPER_CLASS: &str = "table-responsive";

/// Wraps content tables in a responsive container and applies the standard
/// table classes. Returns the number of tables wrapped this call.
pub(crate) fn enhance_tables() -> DomResult<usize> {
    let doc = dom::document()?;
    let mut wrapped = 0;

    for table in dom::query_all::<web_sys::Element>(TABLE_SELECTOR) {
        if let Some(parent) = table.parent_node() {
            let already = table
                .parent_element()
                .is_some_and(|p| has_class(&p, WRAPPER_CLASS));
            if !already {
                let wrapper = doc.create_element("div")?;
                wrapper.set_class_name(WRAPPER_CLASS);
                let table_node: &web_sys::Node = &table;
                parent.insert_before(&wrapper, Some(table_node))?;
                wrapper.append_child(&table)?;
                wrapped += 1;
            }
        }

        table
            .class_list()
            .add_3("table", "table-striped", "table-hover")?;
    }

    Ok(wrapped)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_tables_wrapped_once() {
        let doc = dom::document().unwrap();
        let content = doc.create_element("div").unwrap();
        content.set_class_name("content");
        content.set_id("tables-fixture");
        content.set_inner_html(
            r#"<table id="t1"><tr><td>a</td></tr></table>
               <div class="table-responsive"><table id="t2"><tr><td>b</td></tr></table></div>"#,
        );
        doc.body().unwrap().append_child(&content).unwrap();

        assert_eq!(enhance_tables().unwrap(), 1);
        // Second run finds both already wrapped.
        assert_eq!(enhance_tables().unwrap(), 0);

        for id in ["t1", "t2"] {
            let t = doc.get_element_by_id(id).unwrap();
            let parent = t.parent_element().unwrap();
            assert!(has_class(&parent, WRAPPER_CLASS));
            assert!(!has_class(&parent.parent_element().unwrap(), WRAPPER_CLASS));
            assert_eq!(t.class_name(), "table table-striped table-hover");
        }

        content.remove();
    }
}
