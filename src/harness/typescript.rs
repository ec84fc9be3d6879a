//! TypeScript harness generation
//!
//! Transpiled with `tsc` then run on node, so the harness must typecheck:
//! arguments are `any[]`, the dispatch is a switch on the argument count
//! (spreading a plain `any[]` does not satisfy tsc's tuple expectations),
//! and the entry point is called through an `as any` cast.

use anyhow::Result;

use super::{json_line_list, HarnessGenerator};
use crate::detect;
use crate::languages::Language;

pub struct TypeScriptGenerator;

impl HarnessGenerator for TypeScriptGenerator {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String> {
        let entry = detect::detect(Language::TypeScript, user_source);
        let func = entry.name.as_str();
        let is_tree = func == "levelOrder" || user_source.contains("TreeNode");

        let mut harness = String::with_capacity(user_source.len() + 4096);
        harness.push_str(user_source);
        harness.push_str(&format!(
            r#"

// Parse inputs
const inputs: string[] = {inputs};
const args: any[] = inputs.map(inp => {{
  inp = inp.trim();
  try {{
    return JSON.parse(inp);
  }} catch {{
    if ((inp.startsWith('"') && inp.endsWith('"')) || (inp.startsWith("'") && inp.endsWith("'"))) {{
      return inp.slice(1, -1);
    }}
    return inp;
  }}
}});
"#,
            inputs = json_line_list(input_lines),
        ));

        if is_tree {
            harness.push_str(TREE_HELPERS);
            if func == "lowestCommonAncestor" {
                harness.push_str(LCA_ARG_CONVERSION);
            }
        }

        harness.push_str(&format!(
            r#"
// Call the function with proper argument handling
let result: any;
switch (args.length) {{
  case 0: result = ({func} as any)(); break;
  case 1: result = ({func} as any)(args[0]); break;
  case 2: result = ({func} as any)(args[0], args[1]); break;
  case 3: result = ({func} as any)(args[0], args[1], args[2]); break;
  default: result = ({func} as any)(...args as [any, ...any[]]); break;
}}

// Print result
if (typeof result === 'boolean') {{
  console.log(result.toString().toLowerCase());
}} else if (result && typeof result === 'object' && 'val' in result) {{
  // Node result - print just the value
  console.log(result.val);
}} else if (Array.isArray(result)) {{
  console.log(JSON.stringify(result).replace(/ /g, ''));
}} else {{
  console.log(result);
}}
"#,
            func = func,
        ));

        Ok(harness)
    }
}

const TREE_HELPERS: &str = r#"
// Build tree from a level-order array
function buildTree(values: (number | null)[]): TreeNode | null {
  if (!values || values.length === 0 || values[0] === null) return null;

  const root = new TreeNode(values[0]);
  const queue: TreeNode[] = [root];
  let i = 1;

  while (queue.length > 0 && i < values.length) {
    const node = queue.shift()!;

    if (i < values.length && values[i] !== null) {
      node.left = new TreeNode(values[i] as number);
      queue.push(node.left);
    }
    i++;

    if (i < values.length && values[i] !== null) {
      node.right = new TreeNode(values[i] as number);
      queue.push(node.right);
    }
    i++;
  }

  return root;
}

// Find a node by value in the tree
function findNode(root: TreeNode | null, val: number): TreeNode | null {
  if (!root) return null;
  if (root.val === val) return root;
  return findNode(root.left, val) || findNode(root.right, val);
}

// Convert the first arg to a tree if needed
if (args.length > 0 && Array.isArray(args[0])) {
  args[0] = buildTree(args[0]);
}
"#;

const LCA_ARG_CONVERSION: &str = r#"
// LCA inputs encode target nodes as plain integers
if (args.length >= 3) {
  if (typeof args[1] === 'number') {
    args[1] = findNode(args[0], args[1]);
  }
  if (typeof args[2] === 'number') {
    args[2] = findNode(args[0], args[2]);
  }
}
"#;
