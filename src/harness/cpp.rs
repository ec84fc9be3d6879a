//! C++ harness generation
//!
//! Compiled ahead of time, so the dispatch needs static parameter types: a
//! fixed table maps known entry points to typed call expressions with the
//! input literals spliced in as escaped string constants. Unknown names get
//! a best-effort call whose argument types come from classifying the input
//! literals at synthesis time.

use anyhow::Result;

use super::HarnessGenerator;
use crate::detect;
use crate::languages::Language;
use crate::literal::Literal;

pub struct CppGenerator;

impl HarnessGenerator for CppGenerator {
    fn language(&self) -> Language {
        Language::Cpp
    }

    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String> {
        let entry = detect::detect(Language::Cpp, user_source);
        let method = entry.name.as_str();
        let class_name = entry.class_name.as_deref().unwrap_or("Solution");
        let is_tree = method == "levelOrder" || user_source.contains("TreeNode");

        let mut harness = String::with_capacity(user_source.len() + 6144);
        harness.push_str(HEADERS);
        harness.push_str(user_source);
        harness.push('\n');
        harness.push_str(PARSE_HELPERS);
        if is_tree {
            harness.push_str(TREE_HELPERS);
        }
        harness.push_str(&format!(
            r#"
int main() {{
    {class_name} sol;
    {call}
    return 0;
}}
"#,
            class_name = class_name,
            call = method_call(method, input_lines),
        ));

        Ok(harness)
    }
}

/// Escape an input line for splicing into a C++ string literal.
fn escape(line: &str) -> String {
    line.replace('\\', "\\\\").replace('"', "\\\"")
}

fn input(lines: &[&str], i: usize) -> String {
    escape(lines.get(i).copied().unwrap_or_default())
}

/// Typed call expression for a known entry point.
fn method_call(method: &str, lines: &[&str]) -> String {
    match method {
        // Arrays: vector<int> + int -> vector<int>
        "twoSum" => format!(
            r#"vector<int> nums = parseIntArray("{}");
    int target = stoi("{}");
    auto result = sol.twoSum(nums, target);
    printVector(result);"#,
            input(lines, 0),
            input(lines, 1)
        ),

        // Arrays: vector<int> -> int
        "maxProfit" | "maxArea" | "maxSubArray" | "trap" | "longestConsecutive" => format!(
            r#"vector<int> arr = parseIntArray("{}");
    int result = sol.{}(arr);
    cout << result << endl;"#,
            input(lines, 0),
            method
        ),

        // Arrays: vector<int> -> vector<int>
        "productExceptSelf" => format!(
            r#"vector<int> nums = parseIntArray("{}");
    auto result = sol.{}(nums);
    printVector(result);"#,
            input(lines, 0),
            method
        ),

        // Arrays: vector<int> -> bool
        "containsDuplicate" => format!(
            r#"vector<int> nums = parseIntArray("{}");
    bool result = sol.{}(nums);
    printBool(result);"#,
            input(lines, 0),
            method
        ),

        // Arrays: vector<int> + int -> int
        "subarraySum" => format!(
            r#"vector<int> nums = parseIntArray("{}");
    int k = stoi("{}");
    int result = sol.{}(nums, k);
    cout << result << endl;"#,
            input(lines, 0),
            input(lines, 1),
            method
        ),

        // Arrays: vector<int> + int -> vector<int>
        "topKFrequent" => format!(
            r#"vector<int> nums = parseIntArray("{}");
    int k = stoi("{}");
    auto result = sol.{}(nums, k);
    printVector(result);"#,
            input(lines, 0),
            input(lines, 1),
            method
        ),

        // Strings: string -> bool
        "isPalindrome" | "isValid" => format!(
            r#"string s = parseString("{}");
    bool result = sol.{}(s);
    printBool(result);"#,
            input(lines, 0),
            method
        ),

        // Strings: string, string -> bool
        "isAnagram" | "canConstruct" => format!(
            r#"string s = parseString("{}");
    string t = parseString("{}");
    bool result = sol.{}(s, t);
    printBool(result);"#,
            input(lines, 0),
            input(lines, 1),
            method
        ),

        // Strings: string -> int
        "lengthOfLongestSubstring" | "myAtoi" => format!(
            r#"string s = parseString("{}");
    int result = sol.{}(s);
    cout << result << endl;"#,
            input(lines, 0),
            method
        ),

        // Strings: string -> string
        "longestPalindrome" => format!(
            r#"string s = parseString("{}");
    string result = sol.{}(s);
    cout << result << endl;"#,
            input(lines, 0),
            method
        ),

        // Strings: string, string -> string
        "minWindow" => format!(
            r#"string s = parseString("{}");
    string t = parseString("{}");
    string result = sol.{}(s, t);
    cout << result << endl;"#,
            input(lines, 0),
            input(lines, 1),
            method
        ),

        // Misc: int -> int
        "climbStairs" => format!(
            r#"int n = stoi("{}");
    int result = sol.{}(n);
    cout << result << endl;"#,
            input(lines, 0),
            method
        ),

        // Trees: TreeNode* -> vector<vector<int>>
        "levelOrder" => format!(
            r#"TreeNode* root = buildTree("{}");
    auto result = sol.levelOrder(root);
    printNestedVector(result);"#,
            input(lines, 0)
        ),

        // Trees: TreeNode* -> int
        "maxDepth" | "maxPathSum" => format!(
            r#"TreeNode* root = buildTree("{}");
    int result = sol.{}(root);
    cout << result << endl;"#,
            input(lines, 0),
            method
        ),

        // Trees: TreeNode* -> bool
        "isValidBST" => format!(
            r#"TreeNode* root = buildTree("{}");
    bool result = sol.{}(root);
    printBool(result);"#,
            input(lines, 0),
            method
        ),

        // Trees: LCA with target nodes encoded as plain integers
        "lowestCommonAncestor" => format!(
            r#"TreeNode* root = buildTree("{}");
    int pVal = {};
    int qVal = {};
    TreeNode* p = findNode(root, pVal);
    TreeNode* q = findNode(root, qVal);
    TreeNode* result = sol.{}(root, p, q);
    cout << (result ? result->val : -1) << endl;"#,
            input(lines, 0),
            lines.get(1).map(|l| l.trim()).unwrap_or("0"),
            lines.get(2).map(|l| l.trim()).unwrap_or("0"),
            method
        ),

        // Best-effort call typed from the classified input literals
        _ => generic_call(method, lines),
    }
}

/// Argument construction for an unrecognized entry point: each input line's
/// classified shape picks the parser, and the overloaded printResult handles
/// whatever comes back. Wrong guesses fail at compile time rather than
/// producing silent garbage.
fn generic_call(method: &str, lines: &[&str]) -> String {
    let mut code = String::new();
    let mut args = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let name = format!("arg{}", i);
        let decl = match Literal::parse(line) {
            Literal::Array(_) => format!(
                "vector<int> {} = parseIntArray(\"{}\");",
                name,
                escape(line)
            ),
            Literal::Int(_) => format!("int {} = stoi(\"{}\");", name, escape(line)),
            _ => format!("string {} = parseString(\"{}\");", name, escape(line)),
        };
        code.push_str(&decl);
        code.push_str("\n    ");
        args.push(name);
    }

    code.push_str(&format!(
        "auto result = sol.{}({});\n    printResult(result);",
        method,
        args.join(", ")
    ));
    code
}

const HEADERS: &str = r#"#include <iostream>
#include <vector>
#include <string>
#include <sstream>
#include <algorithm>
#include <unordered_map>
#include <unordered_set>
#include <queue>
#include <stack>
using namespace std;

"#;

const PARSE_HELPERS: &str = r#"
vector<int> parseIntArray(const string& s) {
    vector<int> result;
    string inner = s.substr(1, s.length() - 2);
    if (inner.empty()) return result;
    stringstream ss(inner);
    string item;
    while (getline(ss, item, ',')) {
        result.push_back(stoi(item));
    }
    return result;
}

string parseString(const string& s) {
    if ((s[0] == '"' && s[s.length()-1] == '"') || (s[0] == '\'' && s[s.length()-1] == '\'')) {
        return s.substr(1, s.length() - 2);
    }
    return s;
}

template<typename T>
void printVector(const vector<T>& v) {
    cout << "[";
    for (size_t i = 0; i < v.size(); i++) {
        cout << v[i];
        if (i < v.size() - 1) cout << ",";
    }
    cout << "]" << endl;
}

void printBool(bool b) {
    cout << (b ? "true" : "false") << endl;
}

void printResult(bool b) { printBool(b); }
void printResult(int v) { cout << v << endl; }
void printResult(const string& s) { cout << s << endl; }
void printResult(const vector<int>& v) { printVector(v); }
"#;

const TREE_HELPERS: &str = r#"
// Split the level-order serialization [3,9,20,null,null,15,7] into tokens
vector<string> parseTreeArray(const string& s) {
    vector<string> result;
    string inner = s.substr(1, s.length() - 2);
    if (inner.empty()) return result;
    stringstream ss(inner);
    string item;
    while (getline(ss, item, ',')) {
        size_t start = item.find_first_not_of(" ");
        size_t end = item.find_last_not_of(" ");
        if (start != string::npos) {
            result.push_back(item.substr(start, end - start + 1));
        }
    }
    return result;
}

// Build tree via breadth-first assignment; null tokens are never enqueued
TreeNode* buildTree(const string& s) {
    vector<string> values = parseTreeArray(s);
    if (values.empty() || values[0] == "null") return nullptr;

    TreeNode* root = new TreeNode(stoi(values[0]));
    queue<TreeNode*> q;
    q.push(root);

    size_t i = 1;
    while (!q.empty() && i < values.size()) {
        TreeNode* node = q.front();
        q.pop();

        // Left child
        if (i < values.size() && values[i] != "null") {
            node->left = new TreeNode(stoi(values[i]));
            q.push(node->left);
        }
        i++;

        // Right child
        if (i < values.size() && values[i] != "null") {
            node->right = new TreeNode(stoi(values[i]));
            q.push(node->right);
        }
        i++;
    }

    return root;
}

// Print nested vector (for tree level order output)
void printNestedVector(const vector<vector<int>>& v) {
    cout << "[";
    for (size_t i = 0; i < v.size(); i++) {
        cout << "[";
        for (size_t j = 0; j < v[i].size(); j++) {
            cout << v[i][j];
            if (j < v[i].size() - 1) cout << ",";
        }
        cout << "]";
        if (i < v.size() - 1) cout << ",";
    }
    cout << "]" << endl;
}

// Find a node by value in the tree
TreeNode* findNode(TreeNode* root, int val) {
    if (!root) return nullptr;
    if (root->val == val) return root;
    TreeNode* left = findNode(root->left, val);
    if (left) return left;
    return findNode(root->right, val);
}
"#;
