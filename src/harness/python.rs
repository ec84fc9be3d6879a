//! Python harness generation
//!
//! Interpreted: the harness runs via `python3 -c`, so argument parsing can
//! lean on `ast.literal_eval` at runtime instead of synthesis-time typing.

use anyhow::Result;

use super::{json_line_list, HarnessGenerator};
use crate::detect;
use crate::languages::Language;

/// Entry points known to take or return a binary tree.
const TREE_FUNCTIONS: [&str; 6] = [
    "levelOrder",
    "maxDepth",
    "invertTree",
    "isValidBST",
    "maxPathSum",
    "lowestCommonAncestor",
];

/// Entry points known to take or return a linked list.
const LIST_FUNCTIONS: [&str; 6] = [
    "reverseList",
    "mergeTwoLists",
    "hasCycle",
    "removeNthFromEnd",
    "reorderList",
    "mergeKLists",
];

pub struct PythonGenerator;

impl HarnessGenerator for PythonGenerator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String> {
        let entry = detect::detect(Language::Python, user_source);
        let func = entry.name.as_str();

        let is_tree = TREE_FUNCTIONS.contains(&func) || user_source.contains("TreeNode");
        let is_list = LIST_FUNCTIONS.contains(&func) || user_source.contains("ListNode");

        let mut harness = String::with_capacity(user_source.len() + 4096);

        harness.push_str("import json\nimport ast\nfrom collections import deque\n\n");
        harness.push_str("# User's code\n");
        harness.push_str(user_source);
        harness.push('\n');

        if is_tree {
            harness.push_str(TREE_HELPERS);
        }
        if is_list {
            harness.push_str(LIST_HELPERS);
        }

        harness.push_str(&format!(
            "\n# Parse inputs\ninputs = {}\n{}",
            json_line_list(input_lines),
            ARG_PARSING
        ));

        if is_tree {
            harness.push_str(TREE_ARG_CONVERSION);
            if func == "lowestCommonAncestor" {
                harness.push_str(LCA_ARG_CONVERSION);
            }
        }
        if is_list {
            harness.push_str(LIST_ARG_CONVERSION);
        }

        harness.push_str(&format!("\n# Call the function\nresult = {}(*args)\n", func));

        if is_list {
            if func == "reorderList" {
                harness.push_str(
                    "\n# In-place modification: fall back to the retained head\n\
                     if result is None and original_head is not None:\n    result = original_head\n",
                );
            }
            harness.push_str(
                "\n# Convert a linked list result back to an array\n\
                 if result is not None and hasattr(result, 'val'):\n    result = linked_list_to_array(result)\n\
                 elif result is None:\n    result = []\n",
            );
        }

        if is_tree {
            if func == "lowestCommonAncestor" {
                harness.push_str(
                    "\n# A node result serializes as its value\n\
                     if result is not None and hasattr(result, 'val'):\n    result = result.val\n",
                );
            } else {
                harness.push_str(
                    "\n# Convert a tree result back to a level-order list\n\
                     if result is not None and hasattr(result, 'val'):\n    result = tree_to_list(result)\n",
                );
                if func == "invertTree" {
                    harness
                        .push_str("elif result is None:\n    result = []\n");
                }
            }
        }

        harness.push_str(PRINT_RESULT);

        Ok(harness)
    }
}

const TREE_HELPERS: &str = r#"
# Build tree from a level-order list like [3,9,20,None,None,15,7]
def build_tree(values):
    if not values or values[0] is None:
        return None

    root = TreeNode(values[0])
    queue = deque([root])
    i = 1

    while queue and i < len(values):
        node = queue.popleft()

        # Left child
        if i < len(values) and values[i] is not None:
            node.left = TreeNode(values[i])
            queue.append(node.left)
        i += 1

        # Right child
        if i < len(values) and values[i] is not None:
            node.right = TreeNode(values[i])
            queue.append(node.right)
        i += 1

    return root

# Convert tree to a level-order list, trailing Nones trimmed
def tree_to_list(root):
    if not root:
        return []
    result = []
    queue = deque([root])
    while queue:
        node = queue.popleft()
        if node:
            result.append(node.val)
            queue.append(node.left)
            queue.append(node.right)
        else:
            result.append(None)
    while result and result[-1] is None:
        result.pop()
    return result

# Find a node by value (DFS)
def find_node(root, val):
    if not root:
        return None
    if root.val == val:
        return root
    left = find_node(root.left, val)
    if left:
        return left
    return find_node(root.right, val)
"#;

const LIST_HELPERS: &str = r#"
# Build linked list from array
def build_linked_list(values):
    if not values:
        return None
    head = ListNode(values[0])
    curr = head
    for val in values[1:]:
        curr.next = ListNode(val)
        curr = curr.next
    return head

# Convert linked list to array
def linked_list_to_array(head):
    result = []
    while head:
        result.append(head.val)
        head = head.next
    return result
"#;

const ARG_PARSING: &str = r#"args = []
for inp in inputs:
    inp = inp.strip()
    try:
        # Try to parse as a Python literal (list, int, etc.)
        parsed = ast.literal_eval(inp.replace('null', 'None'))
        args.append(parsed)
    except:
        # Otherwise treat as a string, stripping quotes if present
        if inp.startswith('"') and inp.endswith('"'):
            args.append(inp[1:-1])
        elif inp.startswith("'") and inp.endswith("'"):
            args.append(inp[1:-1])
        else:
            args.append(inp)
"#;

const TREE_ARG_CONVERSION: &str = r#"
# Convert the first arg from a list to a TreeNode
tree_root = None
if args and isinstance(args[0], list):
    tree_root = build_tree(args[0])
    args[0] = tree_root
"#;

const LCA_ARG_CONVERSION: &str = r#"
# LCA inputs encode target nodes as plain integers
if len(args) >= 3:
    if isinstance(args[1], int):
        args[1] = find_node(tree_root, args[1])
    if isinstance(args[2], int):
        args[2] = find_node(tree_root, args[2])
"#;

const LIST_ARG_CONVERSION: &str = r#"
# Convert list args to ListNode chains, retaining the original head
original_head = None
for i, arg in enumerate(args):
    if isinstance(arg, list):
        # A list of lists builds one chain per inner list (mergeKLists)
        if arg and isinstance(arg[0], list):
            args[i] = [build_linked_list(inner) for inner in arg]
        elif all(isinstance(x, int) or x is None for x in arg):
            converted = build_linked_list(arg)
            if i == 0:
                original_head = converted
            args[i] = converted
"#;

const PRINT_RESULT: &str = r#"
if isinstance(result, bool):
    print(str(result).lower())
elif isinstance(result, list):
    print(json.dumps(result).replace(' ', ''))
else:
    print(result)
"#;
