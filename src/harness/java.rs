//! Java harness generation
//!
//! Class-based: the detected method is invoked on an instance of its
//! enclosing class from a generated `Main`. Java needs static parameter
//! types, so dispatch goes through a fixed table of known entry points with
//! fully-typed call expressions; unknown names get a best-effort `Object`
//! call with the detected argument count.

use anyhow::Result;

use super::HarnessGenerator;
use crate::detect;
use crate::languages::Language;

pub struct JavaGenerator;

impl HarnessGenerator for JavaGenerator {
    fn language(&self) -> Language {
        Language::Java
    }

    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String> {
        let entry = detect::detect(Language::Java, user_source);
        let method = entry.name.as_str();
        let class_name = entry.class_name.as_deref().unwrap_or("Solution");
        let is_tree = method == "levelOrder" || user_source.contains("TreeNode");

        let inputs = input_lines
            .iter()
            .map(|l| serde_json::to_string(l).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ");

        let mut harness = String::with_capacity(user_source.len() + 6144);
        harness.push_str("import java.util.*;\nimport java.util.stream.*;\n\n");
        harness.push_str(user_source);
        harness.push_str(&format!(
            r#"

class Main {{
    public static void main(String[] args) {{
        String[] inputs = new String[] {{{inputs}}};
        Object[] parsedArgs = new Object[inputs.length];

        for (int i = 0; i < inputs.length; i++) {{
            String inp = inputs[i].trim();
            parsedArgs[i] = parseInput(inp);
        }}

        {class_name} sol = new {class_name}();
        {call}
    }}
{parse_input}
{print_result}"#,
            inputs = inputs,
            class_name = class_name,
            call = method_call(method, input_lines.len()),
            parse_input = PARSE_INPUT,
            print_result = PRINT_RESULT,
        ));

        if is_tree {
            harness.push_str(TREE_HELPERS);
        }
        harness.push_str("}\n");

        Ok(harness)
    }
}

/// Fully-typed call expression for a known entry point, or a generic
/// `Object`-typed call for anything else.
fn method_call(method: &str, arg_count: usize) -> String {
    match method {
        // Trees: TreeNode -> List<List<Integer>>
        "levelOrder" => "TreeNode root = buildTree(inputs[0]);
        List<List<Integer>> result = sol.levelOrder(root);
        printNestedList(result);"
            .to_string(),

        // Trees: TreeNode -> int
        "maxDepth" | "maxPathSum" => format!(
            "TreeNode root = buildTree(inputs[0]);
        int result = sol.{}(root);
        System.out.println(result);",
            method
        ),

        // Trees: TreeNode -> boolean
        "isValidBST" => format!(
            "TreeNode root = buildTree(inputs[0]);
        boolean result = sol.{}(root);
        printResult(result);",
            method
        ),

        // Arrays: int[] + int -> int[]
        "twoSum" => "Object result = sol.twoSum((int[]) parsedArgs[0], (int) parsedArgs[1]);
        printResult(result);"
            .to_string(),

        // Arrays: int[] -> int / int[] / boolean
        "maxProfit" | "maxArea" | "maxSubArray" | "trap" | "longestConsecutive"
        | "productExceptSelf" | "containsDuplicate" => format!(
            "Object result = sol.{}((int[]) parsedArgs[0]);
        printResult(result);",
            method
        ),

        // Arrays: int[] + int -> int / int[]
        "subarraySum" | "topKFrequent" => format!(
            "Object result = sol.{}((int[]) parsedArgs[0], (int) parsedArgs[1]);
        printResult(result);",
            method
        ),

        // Strings: String -> boolean / int / String
        "isPalindrome" | "isValid" | "lengthOfLongestSubstring" | "myAtoi"
        | "longestPalindrome" => format!(
            "Object result = sol.{}((String) parsedArgs[0]);
        printResult(result);",
            method
        ),

        // Strings: String, String -> boolean / String
        "isAnagram" | "canConstruct" | "minWindow" => format!(
            "Object result = sol.{}((String) parsedArgs[0], (String) parsedArgs[1]);
        printResult(result);",
            method
        ),

        // Misc: int -> int
        "climbStairs" => format!(
            "Object result = sol.{}((int) parsedArgs[0]);
        printResult(result);",
            method
        ),

        // Best-effort call with the detected argument count
        _ => {
            let args = (0..arg_count)
                .map(|i| format!("parsedArgs[{}]", i))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Object result = sol.{}({});
        printResult(result);",
                method, args
            )
        }
    }
}

const PARSE_INPUT: &str = r#"
    static Object parseInput(String inp) {
        inp = inp.trim();
        // Parse arrays like [1,2,3]
        if (inp.startsWith("[") && inp.endsWith("]")) {
            String inner = inp.substring(1, inp.length() - 1).trim();
            if (inner.isEmpty()) return new int[0];
            // Nested arrays pass through as text
            if (inner.startsWith("[")) {
                return inner;
            }
            // Null sentinels mean a level-order encoding; keep the raw text
            // for the tree builder
            if (inner.contains("null")) {
                return inp;
            }
            String[] parts = inner.split(",");
            int[] arr = new int[parts.length];
            for (int i = 0; i < parts.length; i++) {
                arr[i] = Integer.parseInt(parts[i].trim());
            }
            return arr;
        }
        // Quoted strings lose their quotes
        if ((inp.startsWith("\"") && inp.endsWith("\"")) || (inp.startsWith("'") && inp.endsWith("'"))) {
            return inp.substring(1, inp.length() - 1);
        }
        // Integer, then raw token
        try {
            return Integer.parseInt(inp);
        } catch (Exception e) {
            return inp;
        }
    }
"#;

const PRINT_RESULT: &str = r#"
    static void printResult(Object result) {
        if (result instanceof int[]) {
            int[] arr = (int[]) result;
            System.out.print("[");
            for (int i = 0; i < arr.length; i++) {
                System.out.print(arr[i]);
                if (i < arr.length - 1) System.out.print(",");
            }
            System.out.println("]");
        } else if (result instanceof List) {
            System.out.println(result.toString().replace(" ", ""));
        } else if (result instanceof Boolean) {
            System.out.println(result.toString().toLowerCase());
        } else {
            System.out.println(result);
        }
    }
"#;

const TREE_HELPERS: &str = r#"
    // Build tree from a level-order serialization like [3,9,20,null,null,15,7]
    static TreeNode buildTree(String s) {
        s = s.trim();
        if (s.equals("[]") || s.isEmpty()) return null;

        String inner = s.substring(1, s.length() - 1);
        String[] parts = inner.split(",");
        if (parts.length == 0 || parts[0].trim().equals("null")) return null;

        TreeNode root = new TreeNode(Integer.parseInt(parts[0].trim()));
        Queue<TreeNode> queue = new LinkedList<>();
        queue.offer(root);

        int i = 1;
        while (!queue.isEmpty() && i < parts.length) {
            TreeNode node = queue.poll();

            // Left child
            if (i < parts.length && !parts[i].trim().equals("null")) {
                node.left = new TreeNode(Integer.parseInt(parts[i].trim()));
                queue.offer(node.left);
            }
            i++;

            // Right child
            if (i < parts.length && !parts[i].trim().equals("null")) {
                node.right = new TreeNode(Integer.parseInt(parts[i].trim()));
                queue.offer(node.right);
            }
            i++;
        }

        return root;
    }

    // Print nested list for tree level order output
    static void printNestedList(List<List<Integer>> result) {
        StringBuilder sb = new StringBuilder();
        sb.append("[");
        for (int i = 0; i < result.size(); i++) {
            sb.append("[");
            List<Integer> level = result.get(i);
            for (int j = 0; j < level.size(); j++) {
                sb.append(level.get(j));
                if (j < level.size() - 1) sb.append(",");
            }
            sb.append("]");
            if (i < result.size() - 1) sb.append(",");
        }
        sb.append("]");
        System.out.println(sb.toString());
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SUM: &str = r#"
class Solution {
    public int[] twoSum(int[] nums, int target) {
        return new int[0];
    }
}
"#;

    #[test]
    fn known_method_gets_typed_dispatch() {
        let harness = JavaGenerator
            .synthesize(TWO_SUM, &["[2,7,11,15]", "9"])
            .unwrap();
        assert!(harness.contains("sol.twoSum((int[]) parsedArgs[0], (int) parsedArgs[1])"));
        assert!(harness.contains("Solution sol = new Solution();"));
        assert!(harness.contains(r#"new String[] {"[2,7,11,15]", "9"}"#));
        assert!(!harness.contains("buildTree"));
    }

    #[test]
    fn tree_method_builds_from_raw_input() {
        let source = r#"
class TreeNode {
    int val;
    TreeNode left, right;
    TreeNode(int val) { this.val = val; }
}
class Solution {
    public List<List<Integer>> levelOrder(TreeNode root) {
        return new ArrayList<>();
    }
}
"#;
        let harness = JavaGenerator
            .synthesize(source, &["[3,9,20,null,null,15,7]"])
            .unwrap();
        assert!(harness.contains("TreeNode root = buildTree(inputs[0]);"));
        assert!(harness.contains("printNestedList(result);"));
        assert!(harness.contains("static TreeNode buildTree(String s)"));
    }

    #[test]
    fn renamed_class_is_instantiated() {
        let source = r#"
class MyAnswer {
    public boolean containsDuplicate(int[] nums) {
        return false;
    }
}
"#;
        let harness = JavaGenerator.synthesize(source, &["[1,2,3,1]"]).unwrap();
        assert!(harness.contains("MyAnswer sol = new MyAnswer();"));
    }

    #[test]
    fn unknown_method_gets_generic_call() {
        let source = r#"
class Solution {
    public int addBoth(int a, int b) {
        return a + b;
    }
}
"#;
        let harness = JavaGenerator.synthesize(source, &["3", "4"]).unwrap();
        assert!(harness.contains("sol.addBoth(parsedArgs[0], parsedArgs[1])"));
    }

    #[test]
    fn input_splicing_escapes_quotes() {
        let source = r#"
class Solution {
    public boolean isAnagram(String s, String t) {
        return true;
    }
}
"#;
        let harness = JavaGenerator
            .synthesize(source, &["\"anagram\"", "\"nagaram\""])
            .unwrap();
        assert!(harness.contains(r#"new String[] {"\"anagram\"", "\"nagaram\""}"#));
    }
}
